use serde::{Deserialize, Deserializer, Serialize};

/// One entry of `ListeEntreprises` in a search response.
///
/// Every field is kept as the service returned it: a string, or `None` when
/// the service sent `null`. Unknown fields are ignored; a missing field fails
/// the mapping of that entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnterpriseRecord {
    /// Quebec enterprise number (NEQ)
    #[serde(rename = "ID", deserialize_with = "required_nullable")]
    pub id: Option<String>,

    /// Registry file number
    #[serde(rename = "NumeroDossier", deserialize_with = "required_nullable")]
    pub file_number: Option<String>,

    /// Enterprise name
    #[serde(rename = "Nom", deserialize_with = "required_nullable")]
    pub name: Option<String>,

    /// Primary address
    #[serde(rename = "AdressePrimaire", deserialize_with = "required_nullable")]
    pub primary_address: Option<String>,

    /// Registration status
    #[serde(rename = "Statut", deserialize_with = "required_nullable")]
    pub status: Option<String>,

    /// Date of the last status change
    #[serde(rename = "DateChangementEtat", deserialize_with = "required_nullable")]
    pub status_changed_on: Option<String>,

    /// Status of the name (current, former, other)
    #[serde(rename = "StatutDuNom", deserialize_with = "required_nullable")]
    pub name_status: Option<String>,

    /// Date the name came into use
    #[serde(rename = "DateInitiale", deserialize_with = "required_nullable")]
    pub initial_date: Option<String>,

    /// Date the name stopped being used
    #[serde(rename = "DateFinale", deserialize_with = "required_nullable")]
    pub final_date: Option<String>,
}

// With `deserialize_with` and no `default`, serde reports an absent key as
// `missing field` instead of filling in `None`.
fn required_nullable<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_field_is_none() {
        let record: EnterpriseRecord = serde_json::from_value(json!({
            "ID": "1170000000",
            "NumeroDossier": "0001",
            "Nom": "ACME INC.",
            "AdressePrimaire": null,
            "Statut": "Immatriculée",
            "DateChangementEtat": "2020-01-01",
            "StatutDuNom": "En vigueur",
            "DateInitiale": "2019-05-12",
            "DateFinale": null,
        }))
        .unwrap();

        assert_eq!(record.id.as_deref(), Some("1170000000"));
        assert_eq!(record.primary_address, None);
        assert_eq!(record.final_date, None);
    }

    #[test]
    fn test_missing_field_is_error() {
        let err = serde_json::from_value::<EnterpriseRecord>(json!({
            "ID": "1170000000",
            "NumeroDossier": "0001",
            "Nom": "ACME INC.",
            "AdressePrimaire": "",
            "Statut": "",
            "DateChangementEtat": "",
            "StatutDuNom": "",
            "DateInitiale": "",
        }))
        .unwrap_err();

        assert!(err.to_string().contains("missing field `DateFinale`"));
    }

    #[test]
    fn test_serializes_null_back() {
        let record: EnterpriseRecord = serde_json::from_value(json!({
            "ID": "1", "NumeroDossier": "2", "Nom": "N", "AdressePrimaire": "A",
            "Statut": "S", "DateChangementEtat": "D", "StatutDuNom": "SN",
            "DateInitiale": "DI", "DateFinale": null,
        }))
        .unwrap();

        let value = serde_json::to_value(&record).unwrap();
        assert!(value["DateFinale"].is_null());
        assert_eq!(value["ID"], "1");
    }
}
