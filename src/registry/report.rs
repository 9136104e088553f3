use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

/// Outcome of one registry check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Nothing to report
    Ok,
    /// Declared metadata that can never take effect
    Warning(String),
    /// A problem that silently drops properties at runtime
    Failed(String),
}

impl CheckStatus {
    /// Severity used to pick the worst status of a type
    fn severity(&self) -> u8 {
        match self {
            CheckStatus::Ok => 0,
            CheckStatus::Warning(_) => 1,
            CheckStatus::Failed(_) => 2,
        }
    }

    fn message(&self) -> Option<&str> {
        match self {
            CheckStatus::Ok => None,
            CheckStatus::Warning(msg) | CheckStatus::Failed(msg) => Some(msg),
        }
    }
}

/// A finding about one registered type, or one of its properties
#[derive(Debug, Clone)]
pub struct ValidationCheck {
    /// Registered type the finding belongs to
    pub type_name: String,
    /// Property the finding is about; `None` for type-level findings
    pub property: Option<String>,
    /// Result status
    pub status: CheckStatus,
}

impl ValidationCheck {
    pub(crate) fn ok(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            property: None,
            status: CheckStatus::Ok,
        }
    }

    pub(crate) fn new(type_name: &str, property: Option<&str>, status: CheckStatus) -> Self {
        Self {
            type_name: type_name.to_string(),
            property: property.map(str::to_string),
            status,
        }
    }

    /// `Type.Property`, or just the type name
    pub fn subject(&self) -> String {
        match &self.property {
            Some(property) => format!("{}.{}", self.type_name, property),
            None => self.type_name.clone(),
        }
    }
}

/// Findings of one type, in report order
#[derive(Debug)]
pub struct TypeFindings<'a> {
    /// Registered type name
    pub type_name: &'a str,
    /// Every check recorded for the type
    pub checks: Vec<&'a ValidationCheck>,
}

impl TypeFindings<'_> {
    /// Worst status among the type's checks
    pub fn status(&self) -> &CheckStatus {
        self.checks
            .iter()
            .map(|c| &c.status)
            .max_by_key(|s| s.severity())
            .unwrap_or(&CheckStatus::Ok)
    }
}

/// Registry validation report, grouped by type
#[derive(Debug)]
pub struct ValidationReport {
    /// All recorded checks
    pub checks: Vec<ValidationCheck>,
    /// Where the registry came from (file path or "built-in")
    pub source: String,
}

impl ValidationReport {
    /// Create an empty report
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            checks: Vec::new(),
            source: source.into(),
        }
    }

    /// Record a check
    pub fn add_check(&mut self, check: ValidationCheck) {
        self.checks.push(check);
    }

    /// Checks grouped per type, in the order types were first recorded
    pub fn by_type(&self) -> Vec<TypeFindings<'_>> {
        let mut groups: Vec<TypeFindings<'_>> = Vec::new();
        for check in &self.checks {
            match groups.iter_mut().find(|g| g.type_name == check.type_name) {
                Some(group) => group.checks.push(check),
                None => groups.push(TypeFindings {
                    type_name: &check.type_name,
                    checks: vec![check],
                }),
            }
        }
        groups
    }

    /// Findings recorded against a single property
    pub fn property_findings(&self, type_name: &str, property: &str) -> Vec<&ValidationCheck> {
        self.checks
            .iter()
            .filter(|c| c.type_name == type_name && c.property.as_deref() == Some(property))
            .collect()
    }

    /// Whether any check failed
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Whether any check produced a warning
    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    /// Number of types in the report
    pub fn type_count(&self) -> usize {
        self.by_type().len()
    }

    /// Number of types without findings
    pub fn clean_type_count(&self) -> usize {
        self.count_types(0)
    }

    /// Number of types whose worst finding is a warning
    pub fn warning_type_count(&self) -> usize {
        self.count_types(1)
    }

    /// Number of types with at least one failure
    pub fn failing_type_count(&self) -> usize {
        self.count_types(2)
    }

    /// Number of warnings across all types
    pub fn warning_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| matches!(c.status, CheckStatus::Warning(_)))
            .count()
    }

    /// Number of failures across all types
    pub fn failure_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| matches!(c.status, CheckStatus::Failed(_)))
            .count()
    }

    fn count_types(&self, severity: u8) -> usize {
        self.by_type()
            .iter()
            .filter(|g| g.status().severity() == severity)
            .count()
    }

    fn summary(&self) -> String {
        format!(
            "{} types: {} clean, {} with warnings, {} failing ({} failures, {} warnings)",
            self.type_count(),
            self.clean_type_count(),
            self.warning_type_count(),
            self.failing_type_count(),
            self.failure_count(),
            self.warning_count()
        )
    }

    /// Renders the report; `paint` decorates a piece of text for a severity.
    fn render(&self, paint: &dyn Fn(u8, &str) -> String) -> String {
        let mut output = format!("Schema check: {}\n\n", self.source);

        for group in self.by_type() {
            let status = group.status();
            let marker = match status {
                CheckStatus::Ok => "ok",
                CheckStatus::Warning(_) => "warnings",
                CheckStatus::Failed(_) => "FAILED",
            };
            output.push_str(&format!(
                "{:<28} {}\n",
                group.type_name,
                paint(status.severity(), marker)
            ));

            for check in group.checks.iter().filter(|c| c.status != CheckStatus::Ok) {
                let symbol = if check.status.severity() == 2 { "✗" } else { "⚠" };
                let subject = check.property.as_deref().unwrap_or("(type)");
                output.push_str(&format!(
                    "  {} {}: {}\n",
                    paint(check.status.severity(), symbol),
                    subject,
                    check.status.message().unwrap_or_default()
                ));
            }
        }

        output.push('\n');
        output.push_str(&self.summary());
        output.push('\n');
        output
    }

    /// Format the report with colors (plain text without the console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            self.render(&|severity, text| match severity {
                0 => style(text).green().to_string(),
                1 => style(text).yellow().to_string(),
                _ => style(text).red().bold().to_string(),
            })
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            self.to_string()
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&|_, text| text.to_string()))
    }
}
