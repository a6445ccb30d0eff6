use regex::Regex;
use std::sync::LazyLock;

const MAX_SITE_CHARS: usize = 60;
const FALLBACK_SITE: &str = "Site";

static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    // constant pattern
    #[allow(clippy::unwrap_used)]
    Regex::new(r"[^A-Za-z0-9_\- ]").unwrap()
});

/// Download name of a generated report: `<site>_Inspection_Report.pdf`.
///
/// The site name keeps only ASCII letters, digits, `-`, `_` and spaces, is
/// trimmed and capped; nothing left means `Site`.
pub fn report_file_name(site_name: &str) -> String {
    let cleaned = DISALLOWED.replace_all(site_name, "");
    let capped: String = cleaned.trim().chars().take(MAX_SITE_CHARS).collect();
    let site = match capped.trim_end() {
        "" => FALLBACK_SITE,
        site => site,
    };
    format!("{}_Inspection_Report.pdf", site)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_plain_names() {
        assert_eq!(
            report_file_name("Warehouse 7"),
            "Warehouse 7_Inspection_Report.pdf"
        );
    }

    #[test]
    fn strips_disallowed_characters() {
        assert_eq!(
            report_file_name("  Dock #3 / North-East (B_2)  "),
            "Dock 3  North-East B_2_Inspection_Report.pdf"
        );
        assert_eq!(
            report_file_name("Café Zürich"),
            "Caf Zrich_Inspection_Report.pdf"
        );
    }

    #[test]
    fn punctuation_only_falls_back_to_site() {
        assert_eq!(report_file_name("!!!???"), "Site_Inspection_Report.pdf");
        assert_eq!(report_file_name(""), "Site_Inspection_Report.pdf");
    }

    #[test]
    fn long_names_are_capped() {
        let name = report_file_name(&"a".repeat(100));
        assert_eq!(name, format!("{}_Inspection_Report.pdf", "a".repeat(60)));

        let spaced = format!("{} tail", "b".repeat(59));
        assert_eq!(
            report_file_name(&spaced),
            format!("{}_Inspection_Report.pdf", "b".repeat(59))
        );
    }

    #[test]
    fn sanitizer_is_shared_across_threads() {
        let names: Vec<String> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|i| scope.spawn(move || report_file_name(&format!("Bay {i}!"))))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(
            names,
            (0..4)
                .map(|i| format!("Bay {i}_Inspection_Report.pdf"))
                .collect::<Vec<_>>()
        );
    }
}
