//! Translate field descriptors into frame fields.

use query_engine_metadata::metadata::{
    Field, FieldColor, FieldConfig, FieldDescriptor, FieldKind, FieldType,
};

/// Map every descriptor to a field, keeping their order.
pub fn map_fields(descriptors: Vec<FieldDescriptor>) -> Vec<Field> {
    descriptors.into_iter().map(map_field).collect()
}

/// Map a single descriptor. Config entries are only set for metadata the descriptor carries.
pub fn map_field(descriptor: FieldDescriptor) -> Field {
    let FieldDescriptor {
        field_name,
        kind,
        color,
        display_name,
        links,
    } = descriptor;

    Field {
        name: field_name,
        field_type: match kind {
            FieldKind::Number => FieldType::Number,
            FieldKind::String => FieldType::String,
        },
        config: FieldConfig {
            color: color.map(FieldColor::fixed),
            display_name,
            links,
        },
    }
}
