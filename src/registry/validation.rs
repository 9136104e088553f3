use std::collections::HashSet;

use log::debug;

use crate::collection::CollectionInfo;
use crate::types::DataType;
use crate::wrapper::wrapped_value_type;

use super::report::{CheckStatus, ValidationCheck, ValidationReport};
use super::{TypeDef, TypeKind, TypeRegistry};

/// Checks that a registry is internally consistent.
///
/// Failures are problems that silently drop properties at runtime (unknown
/// base types, inheritance cycles, property types naming unregistered
/// records). Warnings are attributes that can never take effect.
pub fn validate_registry(registry: &TypeRegistry, source: &str) -> ValidationReport {
    let mut report = ValidationReport::new(source);

    for def in registry.iter() {
        let mut findings = Vec::new();
        check_hierarchy(registry, def, &mut findings);
        check_properties(registry, def, &mut findings);

        if findings.is_empty() {
            report.add_check(ValidationCheck::ok(def.name.as_str()));
            continue;
        }
        // failures first, then warnings, each in declaration order
        findings.sort_by_key(|check| !matches!(check.status, CheckStatus::Failed(_)));
        for check in findings {
            debug!("{}: {:?}", check.subject(), check.status);
            report.add_check(check);
        }
    }

    report
}

fn failed(def: &TypeDef, property: Option<&str>, message: String) -> ValidationCheck {
    ValidationCheck::new(&def.name, property, CheckStatus::Failed(message))
}

fn warning(def: &TypeDef, property: Option<&str>, message: String) -> ValidationCheck {
    ValidationCheck::new(&def.name, property, CheckStatus::Warning(message))
}

fn check_hierarchy(registry: &TypeRegistry, def: &TypeDef, findings: &mut Vec<ValidationCheck>) {
    if let Some(base) = &def.base {
        match registry.get(base) {
            None => findings.push(failed(def, None, format!("base type '{}' is not registered", base))),
            Some(base_def) if base_def.kind == TypeKind::Interface => {
                findings.push(warning(def, None, format!("base type '{}' is an interface", base)))
            }
            Some(_) => {}
        }
        if def.kind == TypeKind::Interface {
            findings.push(warning(
                def,
                None,
                "interfaces do not inherit base type properties".to_string(),
            ));
        }
    }

    for interface in &def.interfaces {
        match registry.get(interface) {
            None => findings.push(failed(def, None, format!("interface '{}' is not registered", interface))),
            Some(iface) if iface.kind != TypeKind::Interface => findings.push(warning(
                def,
                None,
                format!("'{}' is listed as an interface but is a class", interface),
            )),
            Some(_) => {}
        }
    }

    if in_inheritance_cycle(registry, &def.name) {
        findings.push(failed(def, None, "type inherits from itself".to_string()));
    }
}

fn check_properties(registry: &TypeRegistry, def: &TypeDef, findings: &mut Vec<ValidationCheck>) {
    let mut names = HashSet::new();
    for property in &def.properties {
        let name = Some(property.name.as_str());
        if !names.insert(property.name.as_str()) {
            findings.push(warning(
                def,
                name,
                "declared twice; the first declaration wins".to_string(),
            ));
        }

        if let Err(err) = property.data_type.check_names() {
            findings.push(failed(def, name, format!("type '{}': {}", property.data_type, err)));
        }

        let mut referenced = Vec::new();
        collect_record_names(&property.data_type, &mut referenced);
        for record in referenced {
            if !registry.contains(record) {
                findings.push(failed(def, name, format!("references unregistered type '{}'", record)));
            }
        }

        for ancestor in property.attributes.advanced_when() {
            let known = match ancestor.record_name() {
                Some(record) => registry.contains(record),
                None => true,
            };
            if !known {
                findings.push(warning(
                    def,
                    name,
                    format!("advanced beneath unregistered type '{}'", ancestor),
                ));
            }
        }

        if property.attributes.one_to_many().is_some()
            && CollectionInfo::for_type(wrapped_value_type(&property.data_type)).is_none()
        {
            findings.push(warning(
                def,
                name,
                "declares one-to-many settings but is not a collection".to_string(),
            ));
        }
    }
}

fn collect_record_names<'a>(data_type: &'a DataType, names: &mut Vec<&'a str>) {
    match data_type {
        DataType::Record(name) => names.push(name),
        DataType::Optional(inner) | DataType::Link(inner) | DataType::List(inner) => {
            collect_record_names(inner, names)
        }
        DataType::Map(key, value) => {
            collect_record_names(key, names);
            collect_record_names(value, names);
        }
        DataType::Scalar(_) | DataType::Enum(_) => {}
    }
}

fn in_inheritance_cycle(registry: &TypeRegistry, name: &str) -> bool {
    let mut visited = HashSet::new();
    let mut stack: Vec<&str> = match registry.get(name) {
        Some(def) => def.base.iter().chain(&def.interfaces).map(String::as_str).collect(),
        None => return false,
    };
    while let Some(current) = stack.pop() {
        if current == name {
            return true;
        }
        if !visited.insert(current) {
            continue;
        }
        if let Some(def) = registry.get(current) {
            stack.extend(def.base.iter().chain(&def.interfaces).map(String::as_str));
        }
    }
    false
}
