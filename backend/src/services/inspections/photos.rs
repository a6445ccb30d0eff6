//! # Photo Slot Service
//!
//! `POST /api/inspections/{id}/items/{item_id}/photos/{slot}` takes a
//! multipart upload whose `file` field holds the image. The bytes are stored
//! inline as a `data:<mime>;base64,` URL in the given slot (0..4), replacing
//! whatever was there. `DELETE` on the same path clears the slot and leaves
//! the other slots as they were.
//!
//! The upload is read completely before anything is written, so an aborted
//! request changes nothing.

use super::update::update_inspection;
use crate::services::ServiceError;
use crate::store::Store;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use common::edit::{Edit, EditSession};
use futures_util::StreamExt;
use log::warn;

pub async fn upload(
    store: web::Data<Store>,
    path: web::Path<(String, String, usize)>,
    payload: Multipart,
) -> impl Responder {
    let (id, item_id, slot) = path.into_inner();
    let result = match read_image_field(payload).await {
        Ok(image) => update_inspection(
            &store,
            &id,
            Edit::SetPhoto {
                item_id,
                slot,
                image,
            },
        ),
        Err(e) => Err(e),
    };
    respond(&id, result)
}

pub async fn remove(
    store: web::Data<Store>,
    path: web::Path<(String, String, usize)>,
) -> impl Responder {
    let (id, item_id, slot) = path.into_inner();
    let result = update_inspection(&store, &id, Edit::RemovePhoto { item_id, slot });
    respond(&id, result)
}

fn respond(id: &str, result: Result<EditSession, ServiceError>) -> HttpResponse {
    match result {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(e) => {
            warn!("Photo change on inspection {} failed: {}", id, e);
            e.error_response()
        }
    }
}

/// Reads the `file` field of the upload into an inline data URL.
async fn read_image_field(mut payload: Multipart) -> Result<String, ServiceError> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| ServiceError::Upload(e.to_string()))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));
        if name.as_deref() != Some("file") {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()));
        let declared = field.content_type().map(|m| m.essence_str().to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| ServiceError::Upload(e.to_string()))?;
            bytes.extend_from_slice(&chunk);
        }
        if bytes.is_empty() {
            return Err(ServiceError::Upload("the `file` field is empty".to_string()));
        }

        let mime = image_mime(declared.as_deref(), filename.as_deref())?;
        return Ok(format!("data:{};base64,{}", mime, BASE64.encode(&bytes)));
    }
    Err(ServiceError::Upload("missing `file` field".to_string()))
}

/// The image MIME type of an upload: the declared part type when it is an
/// image, else a guess from the file name.
fn image_mime(declared: Option<&str>, filename: Option<&str>) -> Result<String, ServiceError> {
    if let Some(declared) = declared.filter(|m| m.starts_with("image/")) {
        return Ok(declared.to_string());
    }
    filename
        .and_then(|f| mime_guess::from_path(f).first())
        .filter(|m| m.type_() == mime_guess::mime::IMAGE)
        .map(|m| m.essence_str().to_string())
        .ok_or_else(|| ServiceError::Upload("the uploaded file is not an image".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_image_type_wins() {
        assert_eq!(image_mime(Some("image/jpeg"), Some("x.png")).unwrap(), "image/jpeg");
    }

    #[test]
    fn falls_back_to_file_name() {
        assert_eq!(
            image_mime(Some("application/octet-stream"), Some("site.PNG")).unwrap(),
            "image/png"
        );
        assert_eq!(image_mime(None, Some("a.jpg")).unwrap(), "image/jpeg");
    }

    #[test]
    fn rejects_non_images() {
        assert!(image_mime(Some("text/plain"), Some("notes.txt")).is_err());
        assert!(image_mime(None, None).is_err());
    }
}
