use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Options for an enterprise keyword search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Free-text keywords (enterprise name, NEQ, ...)
    pub keywords: String,

    /// Search domain code (`Domaine`)
    #[serde(default)]
    pub domain: Option<i32>,

    /// Search type code (`Type`)
    #[serde(default, rename = "type")]
    pub kind: Option<i32>,

    /// Search scope code (`Etendue`)
    #[serde(default)]
    pub etendue: Option<i32>,

    /// Zero-based result page, `0` when absent
    #[serde(default)]
    pub page: Option<u32>,
}

impl SearchOptions {
    /// Create search options for the given keywords
    #[must_use]
    pub fn new(keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            ..Self::default()
        }
    }

    /// Set the search domain code
    #[must_use]
    pub fn domain(mut self, domain: i32) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Set the search type code
    #[must_use]
    pub fn kind(mut self, kind: i32) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the search scope code
    #[must_use]
    pub fn etendue(mut self, etendue: i32) -> Self {
        self.etendue = Some(etendue);
        self
    }

    /// Set the result page
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// The page that will actually be requested
    #[must_use]
    pub fn requested_page(&self) -> u32 {
        self.page.unwrap_or(0)
    }

    /// Build the `critere` fields sent to `ObtenirListeEntreprises`.
    ///
    /// Unset codes are sent as `null`, matching what the web front-end does.
    #[must_use]
    pub fn to_criteria(&self) -> Map<String, Value> {
        let mut criteria = Map::new();
        criteria.insert("Domaine".into(), json!(self.domain));
        criteria.insert("Etendue".into(), json!(self.etendue));
        criteria.insert("PageCourante".into(), json!(self.requested_page()));
        criteria.insert("Texte".into(), json!(self.keywords));
        criteria.insert("Type".into(), json!(self.kind));
        criteria.insert(
            "UtilisateurAccepteConditionsUtilisation".into(),
            Value::Bool(true),
        );
        criteria
    }
}

impl From<&str> for SearchOptions {
    fn from(keywords: &str) -> Self {
        Self::new(keywords)
    }
}

impl From<String> for SearchOptions {
    fn from(keywords: String) -> Self {
        Self::new(keywords)
    }
}
