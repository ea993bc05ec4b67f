//! Reusable suites and an in-process generator for scenario tests.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Mutex;

use genesis3_conformance::application::ScenarioRegistry;
use genesis3_conformance::domain::ports::{
    GeneratedFiles, GenerationRequest, Generator, GeneratorError,
};
use genesis3_conformance::presentation::factory;

/// Suites shipped with the repository
pub fn repo_suites_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("suites")
}

pub fn load_repo_registry() -> ScenarioRegistry {
    factory::load_registry(&[repo_suites_dir()]).expect("repository suites must load")
}

/// Backend a generated path belongs to
pub fn provider_of(path: &str) -> &'static str {
    if path.starts_with("backend/app_rbac/") || path.ends_with(".py") {
        "drf"
    } else {
        "spring"
    }
}

/// Files the rdbms module lays down for each backend
pub const RDBMS_SPRING_FILE: &str =
    "backend/src/main/resources/db/changelog/db.changelog-master.yaml";
pub const RDBMS_DRF_FILE: &str = "backend/config/database.py";

/// A well-behaved engine that emits every file the registry's scenarios
/// expect, with every expected substring, routed to the backend that owns
/// the path.
///
/// The security configuration is only emitted when `enableJwtAuth` is on.
/// Faults can be injected per path or per substring to simulate a
/// regressing engine.
pub struct ReferenceGenerator {
    /// module type -> path -> required substrings
    catalog: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
    omitted: BTreeSet<String>,
    stripped: BTreeSet<(String, String)>,
    rejected_types: BTreeSet<String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ReferenceGenerator {
    pub fn from_registry(registry: &ScenarioRegistry) -> Self {
        let mut catalog: BTreeMap<String, BTreeMap<String, BTreeSet<String>>> = BTreeMap::new();
        for (_, scenario) in registry.scenarios() {
            let files = catalog
                .entry(scenario.config.module_type.clone())
                .or_default();
            for path in &scenario.expected_files {
                files.entry(path.clone()).or_default();
            }
            for check in &scenario.file_content_checks {
                files
                    .entry(check.file.clone())
                    .or_default()
                    .extend(check.contains.iter().cloned());
            }
        }

        let rdbms = catalog.entry("rdbms".to_string()).or_default();
        rdbms
            .entry(RDBMS_SPRING_FILE.to_string())
            .or_default()
            .insert("databaseChangeLog".to_string());
        rdbms
            .entry(RDBMS_DRF_FILE.to_string())
            .or_default()
            .insert("DATABASES".to_string());

        Self {
            catalog,
            omitted: BTreeSet::new(),
            stripped: BTreeSet::new(),
            rejected_types: BTreeSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Never emit `path`
    pub fn omitting(mut self, path: &str) -> Self {
        self.omitted.insert(path.to_string());
        self
    }

    /// Emit `path` without `substring`
    pub fn stripping(mut self, path: &str, substring: &str) -> Self {
        self.stripped
            .insert((path.to_string(), substring.to_string()));
        self
    }

    /// Reject every config of `module_type`
    pub fn rejecting(mut self, module_type: &str) -> Self {
        self.rejected_types.insert(module_type.to_string());
        self
    }

    /// `(module_id, provider)` of every call, in call order
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    /// Module ids generated for `provider`, in call order
    pub fn call_order(&self, provider: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(_, p)| p == provider)
            .map(|(module_id, _)| module_id)
            .collect()
    }
}

impl Generator for ReferenceGenerator {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<GeneratedFiles, GeneratorError> {
        self.calls.lock().unwrap().push((
            request.config.module_id.clone(),
            request.provider.to_string(),
        ));

        let module_type = &request.config.module_type;
        if self.rejected_types.contains(module_type) {
            return Err(GeneratorError::Rejected(format!(
                "unsupported module type '{}'",
                module_type
            )));
        }
        let Some(files) = self.catalog.get(module_type) else {
            return Err(GeneratorError::Rejected(format!(
                "unknown module type '{}'",
                module_type
            )));
        };

        let jwt = request.config.flag("enableJwtAuth");
        let mut generated = GeneratedFiles::new();
        for (path, substrings) in files {
            if provider_of(path) != request.provider || self.omitted.contains(path) {
                continue;
            }
            if path.ends_with("SecurityConfig.java") && !jwt {
                continue;
            }
            let body: Vec<&str> = substrings
                .iter()
                .filter(|s| !self.stripped.contains(&(path.clone(), s.to_string())))
                .map(String::as_str)
                .collect();
            generated.insert(
                PathBuf::from(path),
                format!("// {}\n{}\n", request.config.module_id, body.join("\n")),
            );
        }
        Ok(generated)
    }
}

pub const RDBMS_SUITE: &str = r#"
moduleId: extension-rdbms
moduleName: Relational Database
defaults:
  config:
    moduleId: rdbms
    kind: extension
    type: rdbms
    providers: [spring]
scenarios: []
"#;

/// One spring scenario on top of extension-rdbms
pub const WIDGET_SUITE: &str = r#"
moduleId: extension-widget
moduleName: Widgets
scenarios:
  - name: widget-basic
    dependencies: [extension-rdbms]
    config:
      moduleId: widget
      kind: extension
      type: widget
      providers: [spring]
    expectedFiles:
      - backend/Widget.java
    fileContentChecks:
      - file: backend/Widget.java
        contains: ['class Widget', 'module=widget']
"#;

/// Engine that writes `backend/<moduleId>.txt` for dependencies and
/// `backend/Widget.java` for the widget module
pub const WIDGET_ENGINE: &str = r#"out="$GENESIS3_OUTPUT_DIR/backend"
mkdir -p "$out"
case "$GENESIS3_MODULE_ID" in
  widget) printf 'class Widget {}\n// module=%s\n' "$GENESIS3_MODULE_ID" > "$out/Widget.java" ;;
  *) echo "$GENESIS3_PROVIDER" > "$out/$GENESIS3_MODULE_ID.txt" ;;
esac"#;

/// Engine that forgets the widget class body
pub const BROKEN_WIDGET_ENGINE: &str = r#"out="$GENESIS3_OUTPUT_DIR/backend"
mkdir -p "$out"
case "$GENESIS3_MODULE_ID" in
  widget) echo 'interface Gadget {}' > "$out/Widget.java" ;;
  *) echo "$GENESIS3_PROVIDER" > "$out/$GENESIS3_MODULE_ID.txt" ;;
esac"#;
