//! Retrieval context assembly.

use crate::vector_store::RetrievedInstitute;

/// Concatenate the `content` field of each retrieved record, in retrieval
/// order, each followed by a newline. Records without content are skipped.
///
/// Returns the empty string when nothing usable was retrieved; callers must
/// treat a whitespace-only result as "no relevant context found".
pub fn assemble_context(records: &[RetrievedInstitute]) -> String {
    let mut context = String::new();
    for record in records {
        if let Some(content) = &record.payload.content {
            context.push_str(content);
            context.push('\n');
        }
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector_store::InstitutePayload;

    fn record(content: Option<&str>) -> RetrievedInstitute {
        RetrievedInstitute {
            payload: InstitutePayload {
                content: content.map(|c| c.to_string()),
                ..Default::default()
            },
            score: 0.5,
        }
    }

    #[test]
    fn test_empty_input_yields_empty_string() {
        assert_eq!(assemble_context(&[]), "");
    }

    #[test]
    fn test_records_without_content_yield_empty_string() {
        let records = vec![record(None), record(None)];
        assert_eq!(assemble_context(&records), "");
    }

    #[test]
    fn test_preserves_retrieval_order_and_skips_missing() {
        let records = vec![
            record(Some("Institute Name: Niramaya")),
            record(None),
            record(Some("Institute Name: Athayog")),
        ];
        assert_eq!(
            assemble_context(&records),
            "Institute Name: Niramaya\nInstitute Name: Athayog\n"
        );
    }
}
