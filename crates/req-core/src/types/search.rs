use super::EnterpriseRecord;
use crate::{ReqError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Normalized result of `ObtenirListeEntreprises`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Zero-based page returned by the service
    #[serde(rename = "PageCourante")]
    pub current_page: i32,

    /// Number of pages available for this search
    #[serde(rename = "NombrePages")]
    pub total_pages: i32,

    /// Matching enterprises, in service order
    #[serde(rename = "ListeEntreprises")]
    pub enterprises: Vec<EnterpriseRecord>,

    /// Total number of matching records across all pages
    #[serde(rename = "TotalEnregistrements")]
    pub total_records: i64,

    /// Session key echoed by the service
    #[serde(rename = "CleSession")]
    pub session_key: String,

    /// Result type code
    #[serde(rename = "TypeResultat")]
    pub result_type: String,

    /// Message from the service (e.g. "too many results")
    #[serde(rename = "Message")]
    pub message: String,
}

/// Search payload as sent by the service, before defaults are applied
#[derive(Deserialize)]
struct RawSearchPayload {
    #[serde(rename = "PageCourante", default)]
    current_page: Option<i32>,
    #[serde(rename = "NombrePages", default)]
    total_pages: Option<i32>,
    #[serde(rename = "ListeEntreprises", default)]
    enterprises: Option<Vec<Value>>,
    #[serde(rename = "TotalEnregistrements", default)]
    total_records: Option<i64>,
    #[serde(rename = "CleSession", default)]
    session_key: Option<String>,
    #[serde(rename = "TypeResultat", default)]
    result_type: Option<String>,
    #[serde(rename = "Message", default)]
    message: Option<String>,
}

impl SearchResponse {
    /// Map an unwrapped search payload into a typed response.
    ///
    /// Absent or `null` scalars fall back to `0` / `""`, and a `null` or
    /// absent `ListeEntreprises` becomes an empty list. Numbers pass through
    /// unchecked, negative values included. Each list element must carry every
    /// [`EnterpriseRecord`] field, though any of them may be `null`.
    pub fn from_payload(payload: Map<String, Value>) -> Result<Self> {
        let raw: RawSearchPayload =
            serde_json::from_value(Value::Object(payload)).map_err(ReqError::InvalidPayload)?;

        let enterprises = raw
            .enterprises
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                serde_json::from_value(entry).map_err(|source| ReqError::Mapping { index, source })
            })
            .collect::<Result<Vec<EnterpriseRecord>>>()?;

        Ok(Self {
            current_page: raw.current_page.unwrap_or(0),
            total_pages: raw.total_pages.unwrap_or(0),
            enterprises,
            total_records: raw.total_records.unwrap_or(0),
            session_key: raw.session_key.unwrap_or_default(),
            result_type: raw.result_type.unwrap_or_default(),
            message: raw.message.unwrap_or_default(),
        })
    }

    /// Returns true if this page holds no enterprises
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enterprises.is_empty()
    }

    /// Returns the number of enterprises on this page
    #[must_use]
    pub fn len(&self) -> usize {
        self.enterprises.len()
    }

    /// Returns true if the service reports pages after this one
    #[must_use]
    pub const fn has_more_pages(&self) -> bool {
        self.current_page.saturating_add(1) < self.total_pages
    }

    /// The page following this one, if any
    #[must_use]
    pub const fn next_page(&self) -> Option<i32> {
        if self.has_more_pages() {
            Some(self.current_page + 1)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn enterprise(id: &str) -> Value {
        json!({
            "ID": id,
            "NumeroDossier": "0001",
            "Nom": "ACME INC.",
            "AdressePrimaire": "1 rue Principale, Québec",
            "Statut": "Immatriculée",
            "DateChangementEtat": "2020-01-01",
            "StatutDuNom": "En vigueur",
            "DateInitiale": "2019-05-12",
            "DateFinale": "",
        })
    }

    #[test]
    fn test_full_payload() {
        let response = SearchResponse::from_payload(payload(json!({
            "PageCourante": 1,
            "NombrePages": 3,
            "ListeEntreprises": [enterprise("1111111111"), enterprise("2222222222")],
            "TotalEnregistrements": 42,
            "CleSession": "abc",
            "TypeResultat": "1",
            "Message": "ok",
        })))
        .unwrap();

        assert_eq!(response.current_page, 1);
        assert_eq!(response.total_pages, 3);
        assert_eq!(response.total_records, 42);
        assert_eq!(response.session_key, "abc");
        assert_eq!(response.result_type, "1");
        assert_eq!(response.message, "ok");
        assert_eq!(response.len(), 2);
        assert_eq!(response.enterprises[0].id.as_deref(), Some("1111111111"));
        assert_eq!(response.enterprises[1].id.as_deref(), Some("2222222222"));
        assert_eq!(
            response.enterprises[0].primary_address.as_deref(),
            Some("1 rue Principale, Québec")
        );
        assert_eq!(response.next_page(), Some(2));
    }

    #[test]
    fn test_null_list_is_empty() {
        let response = SearchResponse::from_payload(payload(json!({
            "ListeEntreprises": null,
            "Message": "Trop de résultats",
        })))
        .unwrap();
        assert!(response.is_empty());
        assert_eq!(response.message, "Trop de résultats");
    }

    #[test]
    fn test_missing_fields_default() {
        let response = SearchResponse::from_payload(Map::new()).unwrap();
        assert_eq!(response, SearchResponse::default());
        assert_eq!(response.current_page, 0);
        assert_eq!(response.message, "");
        assert!(!response.has_more_pages());
        assert_eq!(response.next_page(), None);
    }

    #[test]
    fn test_null_scalars_default() {
        let response = SearchResponse::from_payload(payload(json!({
            "PageCourante": null,
            "Message": null,
            "CleSession": null,
        })))
        .unwrap();
        assert_eq!(response.current_page, 0);
        assert_eq!(response.message, "");
        assert_eq!(response.session_key, "");
    }

    #[test]
    fn test_extra_fields_ignored() {
        let mut entry = enterprise("3333333333");
        entry["__type"] = json!("Entreprise");
        let response = SearchResponse::from_payload(payload(json!({
            "ListeEntreprises": [entry],
            "Inconnu": true,
        })))
        .unwrap();
        assert_eq!(response.enterprises[0].id.as_deref(), Some("3333333333"));
    }

    #[test]
    fn test_missing_record_field_is_error() {
        let mut broken = enterprise("4444444444");
        broken.as_object_mut().unwrap().remove("Nom");
        let err = SearchResponse::from_payload(payload(json!({
            "ListeEntreprises": [enterprise("1111111111"), broken],
        })))
        .unwrap_err();

        match err {
            ReqError::Mapping { index, source } => {
                assert_eq!(index, 1);
                assert!(source.to_string().contains("Nom"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_null_record_field_is_kept() {
        let mut entry = enterprise("5555555555");
        entry["DateFinale"] = Value::Null;
        let response = SearchResponse::from_payload(payload(json!({
            "ListeEntreprises": [entry],
        })))
        .unwrap();

        assert_eq!(response.len(), 1);
        assert_eq!(response.enterprises[0].final_date, None);
        assert_eq!(response.enterprises[0].name.as_deref(), Some("ACME INC."));
    }

    #[test]
    fn test_negative_numbers_pass_through() {
        let response = SearchResponse::from_payload(payload(json!({
            "PageCourante": -1,
            "NombrePages": -1,
            "TotalEnregistrements": -1,
        })))
        .unwrap();

        assert_eq!(response.current_page, -1);
        assert_eq!(response.total_pages, -1);
        assert_eq!(response.total_records, -1);
        assert_eq!(response.next_page(), None);
    }

    #[test]
    fn test_wrong_scalar_type_is_error() {
        let err = SearchResponse::from_payload(payload(json!({ "PageCourante": "un" }))).unwrap_err();
        assert!(matches!(err, ReqError::InvalidPayload(_)));
        assert!(err.is_mapping());
    }

    #[test]
    fn test_serializes_with_service_names() {
        let value = serde_json::to_value(SearchResponse::default()).unwrap();
        assert_eq!(value["PageCourante"], 0);
        assert_eq!(value["ListeEntreprises"], json!([]));
        assert_eq!(value["Message"], "");
    }
}
