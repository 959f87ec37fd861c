//! Commemorated figure nested inside a Sinaxario record.

use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::{merge_value, FieldIndex};

const FIELDS: &[&str] = &["id", "nome", "imagemurl", "conteudo"];

/// One commemorated figure.
///
/// `id` is supplied by the caller and is not checked for uniqueness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Santos {
    pub id: i64,
    pub nome: String,
    pub imagemurl: String,
    pub conteudo: String,
}

impl<'de> Deserialize<'de> for Santos {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_struct("Santos", FIELDS, SantosVisitor)
    }
}

struct SantosVisitor;

impl<'de> Visitor<'de> for SantosVisitor {
    type Value = Santos;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a santos object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Santos, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut santos = Santos::default();
        while let Some(field) = map.next_key_seed(FieldIndex(FIELDS))? {
            match field {
                Some(0) => merge_value(&mut map, &mut santos.id)?,
                Some(1) => merge_value(&mut map, &mut santos.nome)?,
                Some(2) => merge_value(&mut map, &mut santos.imagemurl)?,
                Some(3) => merge_value(&mut map, &mut santos.conteudo)?,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(santos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_santos_field_names() {
        let santos = Santos {
            id: 7,
            nome: "Sao Basilio".to_string(),
            imagemurl: "https://example.org/basilio.png".to_string(),
            conteudo: "Bispo de Cesareia".to_string(),
        };

        let value = serde_json::to_value(&santos).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 7,
                "nome": "Sao Basilio",
                "imagemurl": "https://example.org/basilio.png",
                "conteudo": "Bispo de Cesareia"
            })
        );
    }

    #[test]
    fn test_santos_missing_fields_default() {
        let santos: Santos = serde_json::from_value(json!({ "nome": "Anonimo" })).unwrap();
        assert_eq!(santos.id, 0);
        assert_eq!(santos.nome, "Anonimo");
        assert!(santos.imagemurl.is_empty());
    }

    #[test]
    fn test_santos_keys_ignore_case() {
        let santos: Santos = serde_json::from_value(json!({
            "ID": 3,
            "Nome": "Sao Nicolau",
            "ImagemURL": "https://example.org/n.png",
            "CONTEUDO": "Bispo de Mira"
        }))
        .unwrap();

        assert_eq!(santos.id, 3);
        assert_eq!(santos.nome, "Sao Nicolau");
        assert_eq!(santos.imagemurl, "https://example.org/n.png");
        assert_eq!(santos.conteudo, "Bispo de Mira");
    }

    #[test]
    fn test_santos_null_fields_default() {
        let santos: Santos =
            serde_json::from_value(json!({ "id": null, "nome": null })).unwrap();
        assert_eq!(santos, Santos::default());
    }

    #[test]
    fn test_santos_rejects_fractional_id() {
        let result: Result<Santos, _> = serde_json::from_value(json!({ "id": 1.5 }));
        assert!(result.is_err());
    }
}
