//! One-shot seeding of the institute catalog into the vector store.
//!
//! Point IDs are derived deterministically from the institute code, so
//! re-running the seed overwrites existing points instead of creating
//! duplicates.

use crate::embedding::Embedder;
use crate::error::Result;
use crate::vector_store::{InstitutePayload, InstitutePoint, VectorStore};
use tracing::info;
use uuid::Uuid;

/// Payload discriminator tag for institute records.
const PAYLOAD_KIND: &str = "institute_metadata";

/// A catalog entry to be embedded and upserted.
#[derive(Debug, Clone)]
pub struct InstituteRecord {
    pub name: &'static str,
    pub code: &'static str,
    pub certification: &'static str,
    pub validity: &'static str,
    pub city: &'static str,
    pub state: &'static str,
    pub country: &'static str,
    pub website: &'static str,
}

impl InstituteRecord {
    /// Deterministic point ID derived from the institute code.
    pub fn point_id(&self) -> Uuid {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, self.code.as_bytes())
    }

    /// The denormalized text blob stored as retrieval context and used as
    /// the embedding input.
    pub fn content_text(&self) -> String {
        format!(
            "Institute Name: {name}\n\
             Code: {code}\n\
             Location: {city}, {state}, {country}\n\
             Certification: {certification}\n\
             Validity: {validity}\n\
             Website: {website}\n\
             \n\
             This is a certified yoga institute located in {city}, {state}.",
            name = self.name,
            code = self.code,
            city = self.city,
            state = self.state,
            country = self.country,
            certification = self.certification,
            validity = self.validity,
            website = self.website,
        )
    }

    fn payload(&self) -> InstitutePayload {
        InstitutePayload {
            institute_name: Some(self.name.to_string()),
            code: Some(self.code.to_string()),
            certification: Some(self.certification.to_string()),
            validity: Some(self.validity.to_string()),
            city: Some(self.city.to_string()),
            state: Some(self.state.to_string()),
            country: Some(self.country.to_string()),
            website: Some(self.website.to_string()),
            content: Some(self.content_text()),
            kind: Some(PAYLOAD_KIND.to_string()),
        }
    }
}

/// The fixed five-institute catalog.
pub fn catalog() -> Vec<InstituteRecord> {
    vec![
        InstituteRecord {
            name: "Sivananda Yoga Vedanta Tapaswini Ashram",
            code: "YC25120",
            certification: "Indian Yoga Association: IYA/S-II/010",
            validity: "N/A",
            city: "Nellore",
            state: "Andhra Pradesh",
            country: "India",
            website: "https://sivananda.org.in/gudur/",
        },
        InstituteRecord {
            name: "Athayog",
            code: "YC24108",
            certification: "YC2400000118",
            validity: "Jul 2024 - 17 Jul 2027",
            city: "Bengaluru Urban",
            state: "Karnataka",
            country: "India",
            website: "www.athayogliving.com",
        },
        InstituteRecord {
            name: "Yogmaya Institute Of Yoga Training",
            code: "YC24114",
            certification: "YC2400000918",
            validity: "Jul 2024 - 17 Jul 2027",
            city: "Jaipur",
            state: "Rajasthan",
            country: "India",
            website: "www.yogmaya.org",
        },
        InstituteRecord {
            name: "Niramaya",
            code: "YC23099",
            certification: "1008/21",
            validity: "May, 2026",
            city: "Cachar",
            state: "Assam",
            country: "India",
            website: "www.niramayayoga.org",
        },
        InstituteRecord {
            name: "Manappuram Yoga Centre",
            code: "YC23077",
            certification: "YAI/IND/KER/24MY2205",
            validity: "27 Jun 2023 - 26 Jun 2026",
            city: "Thrissur",
            state: "Kerala",
            country: "India",
            website: "www.manappuramyogacenter.com",
        },
    ]
}

/// Embed the catalog and upsert it into the store.
///
/// Returns the number of upserted points.
pub async fn run(store: &dyn VectorStore, embedder: &dyn Embedder) -> Result<usize> {
    let records = catalog();

    store.ensure_collection(embedder.dimensions()).await?;

    let texts: Vec<String> = records.iter().map(|r| r.content_text()).collect();
    let embeddings = embedder.embed_batch(&texts).await?;

    let points: Vec<InstitutePoint> = records
        .iter()
        .zip(embeddings)
        .map(|(record, embedding)| InstitutePoint {
            id: record.point_id(),
            embedding,
            payload: record.payload(),
        })
        .collect();

    let count = store.upsert_batch(&points).await?;
    info!("Seeded {} institutes", count);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_five_distinct_institutes() {
        let records = catalog();
        assert_eq!(records.len(), 5);

        let names: HashSet<_> = records.iter().map(|r| r.name).collect();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn test_point_ids_are_deterministic_and_distinct() {
        let records = catalog();

        for record in &records {
            assert_eq!(record.point_id(), record.point_id());
        }

        let ids: HashSet<_> = records.iter().map(|r| r.point_id()).collect();
        assert_eq!(ids.len(), records.len());
    }

    #[test]
    fn test_content_text_carries_validity() {
        let records = catalog();
        let niramaya = records.iter().find(|r| r.name == "Niramaya").unwrap();

        let content = niramaya.content_text();
        assert!(content.contains("Validity: May, 2026"));
        assert!(content.contains("Institute Name: Niramaya"));
        assert!(content.ends_with("located in Cachar, Assam."));
    }

    #[test]
    fn test_payload_schema() {
        let records = catalog();
        let payload = records[0].payload();
        assert_eq!(payload.kind.as_deref(), Some("institute_metadata"));
        assert!(payload.content.is_some());
    }

    #[tokio::test]
    async fn test_reseeding_does_not_duplicate() {
        use crate::vector_store::MemoryVectorStore;
        use async_trait::async_trait;

        struct FixedEmbedder;

        #[async_trait]
        impl Embedder for FixedEmbedder {
            async fn embed(&self, _text: &str) -> crate::error::Result<Vec<f32>> {
                Ok(vec![1.0, 0.0, 0.0])
            }

            async fn embed_batch(
                &self,
                texts: &[String],
            ) -> crate::error::Result<Vec<Vec<f32>>> {
                Ok(texts.iter().map(|_| vec![1.0, 0.0, 0.0]).collect())
            }

            fn dimensions(&self) -> usize {
                3
            }
        }

        let store = MemoryVectorStore::new();
        let embedder = FixedEmbedder;

        assert_eq!(run(&store, &embedder).await.unwrap(), 5);
        assert_eq!(run(&store, &embedder).await.unwrap(), 5);
        assert_eq!(store.count().await.unwrap(), 5);
    }
}
