use std::fmt;

use serde::{Deserialize, Serialize};

/// One token cleanup pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    EmptySquares,
    MacroSemicolon,
    SqlAssign,
    OperatorValues,
    EnumClassAndTypes,
    DoubleAngleClose,
    AccessSpecifiers,
    ForEach,
    StaticIf,
    DirectiveParents,
    PragmaRegions,
    ParameterPacks,
    TrailingReturnTypes,
}

impl Pass {
    /// Every pass in the order a full cleanup runs them.
    ///
    /// Operator values are fused before `>` `>` can become a shift, and a
    /// region pragma overrides the parent its `#` got from the directive pass.
    pub const ALL: [Pass; 13] = [
        Pass::EmptySquares,
        Pass::MacroSemicolon,
        Pass::SqlAssign,
        Pass::OperatorValues,
        Pass::EnumClassAndTypes,
        Pass::DoubleAngleClose,
        Pass::AccessSpecifiers,
        Pass::ForEach,
        Pass::StaticIf,
        Pass::DirectiveParents,
        Pass::PragmaRegions,
        Pass::ParameterPacks,
        Pass::TrailingReturnTypes,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Pass::EmptySquares => "empty_squares",
            Pass::MacroSemicolon => "macro_semicolon",
            Pass::SqlAssign => "sql_assign",
            Pass::EnumClassAndTypes => "enum_class_and_types",
            Pass::DoubleAngleClose => "double_angle_close",
            Pass::AccessSpecifiers => "access_specifiers",
            Pass::OperatorValues => "operator_values",
            Pass::ForEach => "for_each",
            Pass::StaticIf => "static_if",
            Pass::DirectiveParents => "directive_parents",
            Pass::PragmaRegions => "pragma_regions",
            Pass::ParameterPacks => "parameter_packs",
            Pass::TrailingReturnTypes => "trailing_return_types",
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which cleanup passes run, in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    pub passes: Vec<Pass>,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            passes: Pass::ALL.to_vec(),
        }
    }
}

impl CleanupConfig {
    /// Run nothing
    pub fn none() -> Self {
        Self { passes: Vec::new() }
    }

    /// Run only the passes that merge adjacent chunks into one
    pub fn merges_only() -> Self {
        Self {
            passes: vec![
                Pass::EmptySquares,
                Pass::SqlAssign,
                Pass::OperatorValues,
                Pass::DoubleAngleClose,
                Pass::ForEach,
                Pass::StaticIf,
            ],
        }
    }

    /// The same config with one pass removed
    #[must_use]
    pub fn without(mut self, pass: Pass) -> Self {
        self.passes.retain(|p| *p != pass);
        self
    }

    pub fn is_enabled(&self, pass: Pass) -> bool {
        self.passes.contains(&pass)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        for (i, pass) in self.passes.iter().enumerate() {
            if self.passes[..i].contains(pass) {
                return Err(format!("pass {pass} is listed more than once"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_runs_every_pass() {
        let config = CleanupConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.passes.len(), Pass::ALL.len());
        assert!(Pass::ALL.iter().all(|p| config.is_enabled(*p)));
    }

    #[test]
    fn test_presets_valid() {
        assert!(CleanupConfig::none().validate().is_ok());
        assert!(CleanupConfig::merges_only().validate().is_ok());
        assert!(!CleanupConfig::merges_only().is_enabled(Pass::ParameterPacks));
    }

    #[test]
    fn test_without_removes_pass() {
        let config = CleanupConfig::default().without(Pass::StaticIf);
        assert!(!config.is_enabled(Pass::StaticIf));
        assert_eq!(config.passes.len(), Pass::ALL.len() - 1);
    }

    #[test]
    fn test_duplicate_pass_rejected() {
        let config = CleanupConfig {
            passes: vec![Pass::ForEach, Pass::SqlAssign, Pass::ForEach],
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("for_each"));
    }

    #[test]
    fn test_pass_names_match_serde() {
        for pass in Pass::ALL {
            let json = serde_json::to_string(&pass).unwrap();
            assert_eq!(json, format!("\"{}\"", pass.name()));
        }
    }

    #[test]
    fn test_config_from_toml() {
        let config: CleanupConfig = toml::from_str(r#"passes = ["empty_squares", "static_if"]"#).unwrap();
        assert_eq!(config.passes, vec![Pass::EmptySquares, Pass::StaticIf]);

        let config: CleanupConfig = toml::from_str("").unwrap();
        assert_eq!(config, CleanupConfig::default());
    }
}
