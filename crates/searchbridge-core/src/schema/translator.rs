use std::collections::BTreeMap;

use crate::error::{BridgeError, Result};
use crate::schema::model::{
    EntityBinding, ExecutionOptions, FieldDescriptor, FieldKind, FieldMapping, IndexMetadata,
    IndexSettings, MappingDocument,
};

/// Discriminator field added to every mapping when multi-tenancy is enabled.
pub const TENANT_ID_FIELD: &str = "_tenant_id";

/// Translates abstract entity bindings into one index's concrete schema.
///
/// Pure with respect to its inputs; identical inputs always produce an
/// [`IndexMetadata`] that serializes byte-for-byte identically (properties are
/// kept in sorted key order). Bindings sharing the index are merged field by
/// field; a type conflict is an error, never a silent override.
pub fn translate(
    index_name: &str,
    bindings: &[EntityBinding],
    options: &ExecutionOptions,
) -> Result<IndexMetadata> {
    let mut properties = BTreeMap::<String, FieldMapping>::new();

    for binding in bindings {
        for field in &binding.fields {
            let mapping = field_mapping(field, &binding.entity)?;
            merge_field(&mut properties, &field.name, mapping, &binding.entity)?;
        }
    }

    if options.multi_tenancy {
        let tenant = FieldMapping {
            field_type: "keyword".to_string(),
            analyzer: None,
            store: false,
            index: true,
        };
        merge_field(&mut properties, TENANT_ID_FIELD, tenant, "<multi-tenancy>")?;
    }

    tracing::debug!(
        index = index_name,
        fields = properties.len(),
        "translated index schema"
    );

    Ok(IndexMetadata {
        name: index_name.to_string(),
        settings: IndexSettings::default(),
        mapping: MappingDocument {
            dynamic: options.dynamic_mapping,
            properties,
        },
    })
}

fn field_mapping(field: &FieldDescriptor, entity: &str) -> Result<FieldMapping> {
    let field_type = match &field.kind {
        FieldKind::FullText => "text",
        FieldKind::Keyword => "keyword",
        FieldKind::Integer => "integer",
        FieldKind::Long => "long",
        FieldKind::Float => "float",
        FieldKind::Double => "double",
        FieldKind::Bool => "boolean",
        FieldKind::Date => "date",
        FieldKind::Custom(name) => {
            return Err(BridgeError::Translation(format!(
                "field '{}' of entity '{entity}': kind '{name}' has no representation in the target schema",
                field.name
            )));
        }
    };

    if field.analyzer.is_some() && field.kind != FieldKind::FullText {
        return Err(BridgeError::Translation(format!(
            "field '{}' of entity '{entity}': analyzer references are only valid on full-text fields, not '{field_type}'",
            field.name
        )));
    }

    Ok(FieldMapping {
        field_type: field_type.to_string(),
        analyzer: field.analyzer.clone(),
        store: field.stored,
        index: field.indexed,
    })
}

fn merge_field(
    properties: &mut BTreeMap<String, FieldMapping>,
    name: &str,
    mapping: FieldMapping,
    entity: &str,
) -> Result<()> {
    match properties.get(name) {
        None => {
            properties.insert(name.to_string(), mapping);
            Ok(())
        }
        Some(existing) if *existing == mapping => Ok(()),
        Some(existing) => Err(BridgeError::Translation(format!(
            "field '{name}' is mapped twice with incompatible definitions: '{}' vs '{}' (second definition from entity '{entity}')",
            existing.field_type, mapping.field_type
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::schema::model::DynamicMapping;

    fn binding(entity: &str, fields: Vec<FieldDescriptor>) -> EntityBinding {
        EntityBinding {
            entity: entity.to_string(),
            fields,
        }
    }

    fn book_binding() -> EntityBinding {
        binding(
            "Book",
            vec![
                FieldDescriptor::new("title", FieldKind::FullText).with_analyzer("english"),
                FieldDescriptor::new("isbn", FieldKind::Keyword).stored(),
                FieldDescriptor::new("pages", FieldKind::Integer),
            ],
        )
    }

    #[test]
    fn translation_is_deterministic_and_sorted() {
        let options = ExecutionOptions::default();
        let first = translate("books", &[book_binding()], &options).expect("translate");
        let second = translate("books", &[book_binding()], &options).expect("translate");
        let a = serde_json::to_string(&first.mapping).expect("serialize");
        let b = serde_json::to_string(&second.mapping).expect("serialize");
        assert_eq!(a, b);

        let keys: Vec<_> = first.mapping.properties.keys().cloned().collect();
        assert_eq!(keys, vec!["isbn", "pages", "title"]);
    }

    #[test]
    fn translation_does_not_mutate_inputs() {
        let bindings = vec![book_binding()];
        let before = bindings.clone();
        translate("books", &bindings, &ExecutionOptions::default()).expect("translate");
        assert_eq!(bindings, before);
    }

    #[test]
    fn compatible_fields_across_entities_merge_into_one() {
        let bindings = vec![
            binding(
                "Book",
                vec![FieldDescriptor::new("title", FieldKind::FullText)],
            ),
            binding(
                "Journal",
                vec![FieldDescriptor::new("title", FieldKind::FullText)],
            ),
        ];
        let metadata =
            translate("publications", &bindings, &ExecutionOptions::default()).expect("translate");
        assert_eq!(metadata.mapping.properties.len(), 1);
    }

    #[test]
    fn conflicting_field_types_fail_translation() {
        let bindings = vec![
            binding(
                "Book",
                vec![FieldDescriptor::new("title", FieldKind::FullText)],
            ),
            binding(
                "Journal",
                vec![FieldDescriptor::new("title", FieldKind::Keyword)],
            ),
        ];
        let err = translate("publications", &bindings, &ExecutionOptions::default())
            .expect_err("conflict must fail");
        assert_eq!(err.code(), "SCHEMA_TRANSLATION");
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn custom_kind_has_no_target_representation() {
        let bindings = vec![binding(
            "Book",
            vec![FieldDescriptor::new(
                "cover",
                FieldKind::Custom("image_embedding".to_string()),
            )],
        )];
        let err = translate("books", &bindings, &ExecutionOptions::default())
            .expect_err("custom kind must fail");
        assert_eq!(err.code(), "SCHEMA_TRANSLATION");
        assert!(err.to_string().contains("image_embedding"));
    }

    #[test]
    fn analyzer_on_non_text_field_fails_translation() {
        let bindings = vec![binding(
            "Book",
            vec![FieldDescriptor::new("isbn", FieldKind::Keyword).with_analyzer("english")],
        )];
        assert!(translate("books", &bindings, &ExecutionOptions::default()).is_err());
    }

    #[test]
    fn dynamic_policy_is_applied_to_the_document() {
        let options = ExecutionOptions {
            dynamic_mapping: DynamicMapping::False,
            multi_tenancy: false,
        };
        let metadata = translate("books", &[book_binding()], &options).expect("translate");
        assert_eq!(metadata.mapping.dynamic, DynamicMapping::False);
    }

    #[test]
    fn multi_tenancy_adds_keyword_discriminator() {
        let options = ExecutionOptions {
            dynamic_mapping: DynamicMapping::Strict,
            multi_tenancy: true,
        };
        let metadata = translate("books", &[book_binding()], &options).expect("translate");
        let tenant = metadata
            .mapping
            .properties
            .get(TENANT_ID_FIELD)
            .expect("tenant field");
        assert_eq!(tenant.field_type, "keyword");
    }

    #[test]
    fn mapping_document_serializes_to_service_shape() {
        let bindings = vec![binding(
            "Book",
            vec![FieldDescriptor::new("title", FieldKind::FullText).with_analyzer("english")],
        )];
        let metadata =
            translate("books", &bindings, &ExecutionOptions::default()).expect("translate");
        assert_eq!(
            serde_json::to_value(&metadata.mapping).expect("serialize"),
            json!({
                "dynamic": "strict",
                "properties": {
                    "title": {"type": "text", "analyzer": "english"}
                }
            })
        );
    }
}
