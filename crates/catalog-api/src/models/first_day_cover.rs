use serde::{Deserialize, Serialize};

/// A first-day cover: an envelope postmarked on a stamp's release date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirstDayCover {
    #[serde(rename = "postmark_id")]
    pub postmark_id: String,
    #[serde(rename = "envelope_id")]
    pub envelope_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "postmarkSKU", default)]
    pub postmark_sku: Option<i64>,
    #[serde(rename = "envelopeSKU", default)]
    pub envelope_sku: Option<i64>,
    #[serde(default)]
    pub designer: Option<String>,
    pub release: FirstDayCoverRelease,
    #[serde(default)]
    pub images: FirstDayCoverImages,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstDayCoverRelease {
    pub year: i32,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub print_quantity: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FirstDayCoverImages {
    #[serde(default)]
    pub envelope: Option<String>,
    #[serde(default)]
    pub postmark: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_backend_payload() {
        let json = r#"{
            "postmark_id": "pm-2023-01",
            "envelope_id": "env-2023-01",
            "name": "Ukrainian Embroidery",
            "description": "First day of issue",
            "postmarkSKU": 1201,
            "envelopeSKU": 1202,
            "designer": null,
            "release": { "year": 2023, "date": "2023-05-18", "printQuantity": 5000 },
            "images": { "envelope": "https://img/env.png", "postmark": null }
        }"#;

        let cover: FirstDayCover = serde_json::from_str(json).unwrap();
        assert_eq!(cover.postmark_id, "pm-2023-01");
        assert_eq!(cover.envelope_sku, Some(1202));
        assert_eq!(cover.release.print_quantity, Some(5000));
        assert!(cover.designer.is_none());
        assert!(cover.images.postmark.is_none());
    }
}
