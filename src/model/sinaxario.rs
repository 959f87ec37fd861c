//! Top-level calendar-day record.

use std::fmt;

use mongodb::bson::oid::ObjectId;
use mongodb::bson::Bson;
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::{merge_value, FieldIndex, Santos};

const FIELDS: &[&str] = &["id", "data", "datajuliano", "comemorados", "fonte", "santos"];

/// A calendar-day record with its commemorated figures.
///
/// `id` is assigned by the service on creation; any value sent by a
/// client is overwritten. `data` is free text and is never parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sinaxario {
    pub id: i64,
    pub data: String,
    pub datajuliano: String,
    pub comemorados: String,
    pub fonte: String,

    /// Insertion order is preserved.
    pub santos: Vec<Santos>,
}

impl Sinaxario {
    /// Decode a request body. A bare `null` body decodes to an empty record.
    pub fn from_json_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        Ok(serde_json::from_slice::<Option<Self>>(body)?.unwrap_or_default())
    }

    /// Same record with `id` replaced.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }
}

impl<'de> Deserialize<'de> for Sinaxario {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_struct("Sinaxario", FIELDS, SinaxarioVisitor)
    }
}

struct SinaxarioVisitor;

impl<'de> Visitor<'de> for SinaxarioVisitor {
    type Value = Sinaxario;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sinaxario object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Sinaxario, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut record = Sinaxario::default();
        while let Some(field) = map.next_key_seed(FieldIndex(FIELDS))? {
            match field {
                Some(0) => merge_value(&mut map, &mut record.id)?,
                Some(1) => merge_value(&mut map, &mut record.data)?,
                Some(2) => merge_value(&mut map, &mut record.datajuliano)?,
                Some(3) => merge_value(&mut map, &mut record.comemorados)?,
                Some(4) => merge_value(&mut map, &mut record.fonte)?,
                Some(5) => {
                    // `null` entries become empty figures.
                    if let Some(santos) = map.next_value::<Option<Vec<Option<Santos>>>>()? {
                        record.santos = santos.into_iter().map(Option::unwrap_or_default).collect();
                    }
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(record)
    }
}

/// Reference to a stored document, as generated by the backing store.
///
/// Rendered as the 24-character hex form of a BSON ObjectId.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InsertedId(String);

impl InsertedId {
    /// Generate a fresh reference locally.
    pub fn generate() -> Self {
        Self(ObjectId::new().to_hex())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<ObjectId> for InsertedId {
    fn from(oid: ObjectId) -> Self {
        Self(oid.to_hex())
    }
}

impl From<Bson> for InsertedId {
    fn from(value: Bson) -> Self {
        match value {
            Bson::ObjectId(oid) => oid.into(),
            Bson::String(s) => Self(s),
            other => Self(other.to_string()),
        }
    }
}

impl fmt::Display for InsertedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_full_payload() {
        let body = json!({
            "id": 99,
            "data": "2024-01-01",
            "datajuliano": "2023-12-19",
            "comemorados": "Circuncisao do Senhor; Sao Basilio",
            "fonte": "Menologio",
            "santos": [
                { "id": 1, "nome": "Sao Basilio", "imagemurl": "", "conteudo": "..." },
                { "id": 2, "nome": "Sao Gregorio", "imagemurl": "", "conteudo": "..." }
            ]
        });

        let record = Sinaxario::from_json_slice(body.to_string().as_bytes()).unwrap();
        assert_eq!(record.id, 99);
        assert_eq!(record.data, "2024-01-01");
        assert_eq!(record.santos.len(), 2);
        assert_eq!(record.santos[0].nome, "Sao Basilio");
        assert_eq!(record.santos[1].nome, "Sao Gregorio");
    }

    #[test]
    fn test_decode_empty_object() {
        let record = Sinaxario::from_json_slice(b"{}").unwrap();
        assert_eq!(record, Sinaxario::default());
    }

    #[test]
    fn test_decode_null_santos() {
        let record =
            Sinaxario::from_json_slice(br#"{"data":"2024-01-01","santos":null}"#).unwrap();
        assert!(record.santos.is_empty());
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let record =
            Sinaxario::from_json_slice(br#"{"data":"x","_id":"abc","extra":true}"#).unwrap();
        assert_eq!(record.data, "x");
    }

    #[test]
    fn test_decode_keys_ignore_case() {
        let body = json!({
            "Data": "2024-01-01",
            "DataJuliano": "19 de dezembro",
            "Comemorados": "Sao Basilio",
            "Fonte": "Menologio",
            "Santos": [{ "Nome": "Sao Basilio" }]
        });
        let record = Sinaxario::from_json_slice(body.to_string().as_bytes()).unwrap();

        assert_eq!(record.data, "2024-01-01");
        assert_eq!(record.datajuliano, "19 de dezembro");
        assert_eq!(record.comemorados, "Sao Basilio");
        assert_eq!(record.fonte, "Menologio");
        assert_eq!(record.santos[0].nome, "Sao Basilio");

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["fonte"], "Menologio");
        assert!(value.get("Fonte").is_none());
    }

    #[test]
    fn test_decode_repeated_key_last_wins() {
        let record =
            Sinaxario::from_json_slice(br#"{"data":"first","fonte":"a","Data":"second"}"#).unwrap();
        assert_eq!(record.data, "second");
        assert_eq!(record.fonte, "a");
    }

    #[test]
    fn test_decode_null_keeps_earlier_value() {
        let record = Sinaxario::from_json_slice(br#"{"fonte":"Menologio","fonte":null}"#).unwrap();
        assert_eq!(record.fonte, "Menologio");
    }

    #[test]
    fn test_decode_null_body_is_empty_record() {
        let record = Sinaxario::from_json_slice(b"null").unwrap();
        assert_eq!(record, Sinaxario::default());
    }

    #[test]
    fn test_decode_null_santos_entry() {
        let record = Sinaxario::from_json_slice(br#"{"santos":[null,{"nome":"x"}]}"#).unwrap();
        assert_eq!(record.santos.len(), 2);
        assert_eq!(record.santos[0], Santos::default());
        assert_eq!(record.santos[1].nome, "x");
    }

    #[test]
    fn test_decode_rejects_wrong_types() {
        assert!(Sinaxario::from_json_slice(br#"{"id":"one"}"#).is_err());
        assert!(Sinaxario::from_json_slice(br#"{"santos":{}}"#).is_err());
        assert!(Sinaxario::from_json_slice(b"not json").is_err());
        assert!(Sinaxario::from_json_slice(b"42").is_err());
        assert!(Sinaxario::from_json_slice(b"[]").is_err());
    }

    #[test]
    fn test_encode_always_emits_santos_array() {
        let value = serde_json::to_value(Sinaxario::default().with_id(3)).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["santos"], json!([]));
    }

    #[test]
    fn test_bson_round_trip_preserves_santos_order() {
        let record = Sinaxario {
            id: 1,
            data: "2024-01-06".to_string(),
            santos: vec![
                Santos { id: 2, ..Default::default() },
                Santos { id: 1, ..Default::default() },
            ],
            ..Default::default()
        };

        let doc = mongodb::bson::to_document(&record).unwrap();
        let back: Sinaxario = mongodb::bson::from_document(doc).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_inserted_id_from_object_id() {
        let oid = ObjectId::new();
        let id = InsertedId::from(Bson::ObjectId(oid));
        assert_eq!(id.as_str(), oid.to_hex());
        assert_eq!(id.as_str().len(), 24);
        assert_eq!(serde_json::to_value(&id).unwrap(), json!(oid.to_hex()));
    }
}
