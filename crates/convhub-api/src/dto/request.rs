//! Query parameters.

use serde::Deserialize;

/// `GET /api/templates?format=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTemplatesQuery {
    /// Only list templates for this format.
    pub format: Option<String>,
}

/// `POST /api/templates/{format}?name=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddTemplateQuery {
    /// Explicit template name; derived from the file name when absent.
    pub name: Option<String>,
}
