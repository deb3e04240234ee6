pub mod article;
pub mod contact;
pub mod html;
pub mod pricing;
pub mod resource;
pub mod tech;
pub mod tech_signatures;

pub use html::Document;
