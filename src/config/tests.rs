//! Tests for definition parsing and validation.

use crate::config::types::default_resolve_extensions;
use crate::config::{
    BuildDefinition, ChunkSelection, EnabledWhen, EnforceOrder, LoaderStep, PerEnvironment,
    PluginSpec,
};
use crate::environment::Environment;
use crate::error::BuildplanError;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_default_definition() {
    let def = BuildDefinition::default();

    assert!(def.entry.is_empty());
    assert_eq!(def.output.path, "dist");
    assert!(!def.output.clean);
    assert_eq!(def.output.target, PerEnvironment::Uniform("web".to_string()));
    assert_eq!(def.resolve_extensions, default_resolve_extensions());
    assert!(def.rules.is_empty());
    assert!(def.plugins.is_empty());
    assert!(def.optimization.minimize);
    assert_eq!(def.dev_server.port, 8080);
    assert_eq!(
        def.dev_server.hot,
        EnabledWhen::Only(vec![Environment::Development])
    );
}

#[test]
fn test_parse_empty_yaml_uses_defaults() {
    let def = BuildDefinition::from_yaml("").unwrap();
    assert_eq!(def, BuildDefinition::default());
}

#[test]
fn test_unknown_fields_are_ignored() {
    let yaml = r#"
future_section:
  anything: 1
output:
  path: build
  future_field: true
"#;
    let def = BuildDefinition::from_yaml(yaml).unwrap();
    assert_eq!(def.output.path, "build");
}

#[test]
fn test_parse_rule_use_forms() {
    let yaml = r#"
rules:
  - match: '/\.tsx?$/'
    exclude: '/node_modules/'
    use: ts-loader
  - match: '/\.(js|jsx)?$/'
    use: [babel-loader, { loader: eslint-loader }]
  - match: '/\.(scss|css)$/'
    use:
      - css-loader
      - loader: sass-loader
        options:
          sourceMap: true
  - match: '/\.(jpg|png)$/i'
    enforce: pre
    type: asset/resource
    use:
      loader: image-webpack-loader
"#;
    let def = BuildDefinition::from_yaml(yaml).unwrap();
    assert_eq!(def.rules.len(), 4);

    assert_eq!(def.rules[0].match_pattern, r"/\.tsx?$/");
    assert_eq!(def.rules[0].exclude.as_deref(), Some("/node_modules/"));
    assert_eq!(def.rules[0].loaders, vec![LoaderStep::new("ts-loader")]);
    assert_eq!(def.rules[0].enforce, EnforceOrder::Normal);

    assert_eq!(
        def.rules[1].loaders,
        vec![LoaderStep::new("babel-loader"), LoaderStep::new("eslint-loader")]
    );

    let sass = &def.rules[2].loaders[1];
    assert_eq!(sass.loader, "sass-loader");
    assert_eq!(
        sass.options.get("sourceMap"),
        Some(&serde_yaml::Value::Bool(true))
    );

    assert_eq!(def.rules[3].enforce, EnforceOrder::Pre);
    assert_eq!(def.rules[3].asset_type.as_deref(), Some("asset/resource"));
    assert_eq!(
        def.rules[3].loaders,
        vec![LoaderStep::new("image-webpack-loader")]
    );
}

#[test]
fn test_rule_without_use_parses_with_empty_chain() {
    // Empty chains are rejected later by the resolver, not the parser.
    let def = BuildDefinition::from_yaml("rules:\n  - match: '*.woff'\n").unwrap();
    assert!(def.rules[0].loaders.is_empty());
}

#[test]
fn test_parse_plugin_conditions() {
    let yaml = r#"
plugins:
  - name: mini-css-extract-plugin
  - name: react-refresh-webpack-plugin
    enabled: { only: [development] }
  - name: bundle-analyzer
    enabled: false
  - name: eslint-webpack-plugin
    enabled: { except: [test] }
    options:
      extensions: [ts, tsx, js, jsx]
"#;
    let def = BuildDefinition::from_yaml(yaml).unwrap();

    assert_eq!(def.plugins[0].enabled, EnabledWhen::Always);
    assert_eq!(
        def.plugins[1].enabled,
        EnabledWhen::Only(vec![Environment::Development])
    );
    assert_eq!(def.plugins[2].enabled, EnabledWhen::Never);
    assert_eq!(
        def.plugins[3].enabled,
        EnabledWhen::Except(vec![Environment::Test])
    );
    assert!(def.plugins[3].options.contains_key("extensions"));
}

#[test]
fn test_enabled_when_evaluation_is_total() {
    let conditions = [
        EnabledWhen::Always,
        EnabledWhen::Never,
        EnabledWhen::Only(vec![Environment::Production]),
        EnabledWhen::Except(vec![Environment::Production]),
    ];
    let expected = [
        [true, true, true],
        [false, false, false],
        [false, true, false],
        [true, false, true],
    ];

    for (condition, row) in conditions.iter().zip(expected) {
        for (env, want) in Environment::ALL.iter().zip(row) {
            assert_eq!(condition.evaluate(*env), want, "{:?} / {}", condition, env);
        }
    }
}

#[test]
fn test_parse_per_environment_target() {
    let yaml = r#"
output:
  path: dist
  asset_module_filename: "assets/[hash][ext][query]"
  clean: true
  target:
    default: web
    production: browserslist
"#;
    let def = BuildDefinition::from_yaml(yaml).unwrap();

    assert!(def.output.clean);
    assert_eq!(
        def.output.asset_module_filename.as_deref(),
        Some("assets/[hash][ext][query]")
    );
    assert_eq!(def.output.target.select(Environment::Development), "web");
    assert_eq!(def.output.target.select(Environment::Test), "web");
    assert_eq!(
        def.output.target.select(Environment::Production),
        "browserslist"
    );
}

#[test]
fn test_parse_optimization_and_transform() {
    let yaml = r#"
optimization:
  minimizers:
    - name: terser-webpack-plugin
      enabled: { only: [production] }
    - name: css-minimizer-webpack-plugin
  split_chunks:
    - name: vendors
      test: '/node_modules/'
      chunks: all
      enforce: true
transform:
  presets:
    - name: "@babel/preset-env"
    - name: "@babel/preset-react"
      options: { runtime: automatic }
  plugins:
    - name: react-refresh/babel
      enabled: { only: [development] }
"#;
    let def = BuildDefinition::from_yaml(yaml).unwrap();

    assert!(def.optimization.minimize);
    assert_eq!(def.optimization.minimizers.len(), 2);
    let vendors = &def.optimization.split_chunks[0];
    assert_eq!(vendors.name, "vendors");
    assert_eq!(vendors.chunks, ChunkSelection::All);
    assert!(vendors.enforce);

    assert_eq!(def.transform.presets.len(), 2);
    assert_eq!(def.transform.plugins[0].name, "react-refresh/babel");
}

#[test]
fn test_validate_port_must_be_positive() {
    let result = BuildDefinition::from_yaml("dev_server:\n  port: 0\n");
    let err = result.unwrap_err();
    assert!(matches!(err, BuildplanError::UserError(_)));
    assert!(err.to_string().contains("dev_server.port"));
}

#[test]
fn test_validate_resolve_extensions_need_dot() {
    let err = BuildDefinition::from_yaml("resolve_extensions: [ts]\n").unwrap_err();
    assert!(matches!(err, BuildplanError::UserError(_)));
    assert!(err.to_string().contains("'.ts'"));

    assert!(BuildDefinition::from_yaml("resolve_extensions: ['']\n").is_err());
}

#[test]
fn test_validate_entry_needs_modules() {
    let result = BuildDefinition::from_yaml("entry:\n  main: []\n");
    assert!(result.unwrap_err().to_string().contains("entry 'main'"));
}

#[test]
fn test_invalid_yaml_is_user_error() {
    let err = BuildDefinition::from_yaml("rules: [unclosed").unwrap_err();
    assert!(matches!(err, BuildplanError::UserError(_)));
    assert!(err.to_string().contains("failed to parse definition YAML"));
}

#[test]
fn test_yaml_round_trip_preserves_definition() {
    let mut def = BuildDefinition::default();
    def.plugins.push(
        PluginSpec::new("html-webpack-plugin")
            .enabled_when(EnabledWhen::Except(vec![Environment::Test]))
            .with_option("favicon", serde_yaml::Value::from("./public/favicon.ico")),
    );
    def.devtool = Some("source-map".to_string());

    let yaml = def.to_yaml().unwrap();
    let parsed = BuildDefinition::from_yaml(&yaml).unwrap();
    assert_eq!(parsed, def);
}

#[test]
fn test_load_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("buildplan.yaml");
    fs::write(&path, "devtool: source-map\noutput:\n  clean: true\n").unwrap();

    let def = BuildDefinition::load(&path).unwrap();
    assert_eq!(def.devtool.as_deref(), Some("source-map"));
    assert!(def.output.clean);
}

#[test]
fn test_load_missing_file_is_user_error() {
    let temp = TempDir::new().unwrap();
    let err = BuildDefinition::load(temp.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, BuildplanError::UserError(_)));
    assert!(err.to_string().contains("failed to read definition file"));
}
