//! Server-side HTML for the front-desk page
//!
//! Rendering is a pure function of [`PageModel`]; handlers build the model
//! from the store and the request, then call [`render`].

pub mod flash;
pub mod html;
pub mod page;

pub use flash::{Flash, FlashLevel, Notice};
pub use page::{render, FormValues, PageModel, Tab};
