mod template;

pub use template::{DetailedTemplate, TemplateField, TemplateRef};
