#![no_main]

use libfuzzer_sys::fuzz_target;
use mzbind::config::SchemaConfig;
use mzbind::registry::validate_registry;
use mzbind::schema::{ColumnOptions, DataSchema};
use mzbind::types::DataType;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Type expressions must either parse or fail; printing a parsed type must
    // parse back to the same type
    if let Ok(ty) = text.parse::<DataType>() {
        let reparsed: DataType = ty.to_string().parse().expect("printed type must parse");
        assert_eq!(reparsed, ty);
    }

    // Schema files may be arbitrarily broken (unknown types, cycles); loading,
    // validating and expanding them must never panic or hang
    let Ok(config) = SchemaConfig::from_str(text) else {
        return;
    };
    let Ok(registry) = config.into_registry() else {
        return;
    };
    let _ = validate_registry(&registry, "fuzz");

    let names: Vec<String> = registry.iter().map(|def| def.name().to_string()).collect();
    let schema = DataSchema::new(registry);
    let options = ColumnOptions {
        max_depth: 3,
        include_advanced: true,
    };
    for name in names.iter().take(8) {
        for column in schema.leaf_columns(&DataType::record(name), &options) {
            let _ = schema.display_name(&column);
            let _ = schema.is_advanced(&column);
        }
    }
});
