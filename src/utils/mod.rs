//! Small helpers shared by the views and the server.

pub mod html;
pub mod mime;
