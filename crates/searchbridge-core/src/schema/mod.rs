mod model;
mod translator;

pub use model::{
    Analysis, DynamicMapping, EntityBinding, ExecutionOptions, FieldDescriptor, FieldKind,
    FieldMapping, IndexMetadata, IndexSettings, MappingDocument,
};
pub use translator::{TENANT_ID_FIELD, translate};
