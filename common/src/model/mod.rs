pub mod inspection;
pub mod response;
pub mod template;
