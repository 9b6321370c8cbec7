//! Buildplan: declarative build-configuration resolver for front-end build pipelines.
//!
//! A static [`BuildDefinition`](config::BuildDefinition) (rules, plugins,
//! output, dev server, optimization, transform presets) is combined with an
//! [`Environment`](environment::Environment) into one immutable
//! [`ResolvedConfig`](resolver::ResolvedConfig) that external build tools read.
//!
//! ```
//! use buildplan::config::BuildDefinition;
//! use buildplan::environment::Environment;
//! use buildplan::resolver::ConfigResolver;
//!
//! let def = BuildDefinition::from_yaml(r#"
//! rules:
//!   - match: '/\.tsx?$/'
//!     exclude: '/node_modules/'
//!     use: ts-loader
//! plugins:
//!   - name: react-refresh-webpack-plugin
//!     enabled: { only: [development] }
//! "#)?;
//!
//! let config = ConfigResolver::new(&def).resolve(Environment::Production)?;
//! assert!(config.plugins().is_empty());
//! assert_eq!(config.match_rule("src/App.tsx").len(), 1);
//! # Ok::<(), buildplan::error::BuildplanError>(())
//! ```

pub mod config;
pub mod environment;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod pattern;
pub mod resolver;
