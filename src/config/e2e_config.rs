use crate::utils::error::{ApiError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_SPEC_PATTERN: &str = "cypress/e2e/**/*.cy.js";
pub const DEFAULT_SUPPORT_FILE: &str = "cypress/support/e2e.js";

/// End-to-end runner configuration, read from the `[e2e]` table of a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct E2eFile {
    #[serde(default)]
    pub e2e: E2eConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct E2eConfig {
    pub base_url: String,
    pub spec_pattern: String,
    pub support_file: SupportFile,
}

/// `false` disables the shared support file, `true` uses the default
/// location, a string names the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SupportFile {
    Toggle(bool),
    Path(String),
}

impl Default for E2eConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            spec_pattern: DEFAULT_SPEC_PATTERN.to_string(),
            support_file: SupportFile::Toggle(false),
        }
    }
}

impl E2eConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content)?;
        let file: E2eFile = toml::from_str(&processed_content)?;
        Ok(file.e2e)
    }

    pub fn support_file_path(&self) -> Option<PathBuf> {
        match &self.support_file {
            SupportFile::Toggle(false) => None,
            SupportFile::Toggle(true) => Some(PathBuf::from(DEFAULT_SUPPORT_FILE)),
            SupportFile::Path(path) => Some(PathBuf::from(path)),
        }
    }

    pub fn spec_matcher(&self) -> Result<SpecPattern> {
        SpecPattern::new(&self.spec_pattern)
    }

    /// Lists spec files under `root` matching `spec_pattern`, as sorted
    /// `/`-separated paths relative to `root`.
    pub fn discover_specs<P: AsRef<Path>>(&self, root: P) -> Result<Vec<String>> {
        let matcher = self.spec_matcher()?;
        let root = root.as_ref();
        let mut found = Vec::new();

        if root.is_dir() {
            walk(root, root, &matcher, &mut found)?;
        } else {
            tracing::warn!("Spec root {} does not exist", root.display());
        }

        found.sort();
        Ok(found)
    }
}

impl Validate for E2eConfig {
    fn validate(&self) -> Result<()> {
        validate_url("e2e.base_url", &self.base_url)?;
        validate_non_empty_string("e2e.spec_pattern", &self.spec_pattern)?;
        self.spec_matcher()?;

        if let SupportFile::Path(path) = &self.support_file {
            validate_path("e2e.support_file", path)?;
        }
        Ok(())
    }
}

fn walk(root: &Path, dir: &Path, matcher: &SpecPattern, found: &mut Vec<String>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk(root, &path, matcher, found)?;
            continue;
        }

        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        if matcher.matches(&relative) {
            found.push(relative);
        }
    }
    Ok(())
}

/// 替換環境變數 (例如 ${BASE_URL})
fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ApiError::ServerError {
        message: format!("env substitution pattern: {}", e),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });

    Ok(result.to_string())
}

/// A compiled spec glob.
///
/// `**/` spans any number of directories, `*` any run of characters other
/// than `/`, `?` a single such character and `{a,b}` either alternative.
#[derive(Debug, Clone)]
pub struct SpecPattern {
    regex: Regex,
}

impl SpecPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&glob_to_regex(pattern)).map_err(|e| {
            ApiError::InvalidConfigValueError {
                field: "e2e.spec_pattern".to_string(),
                value: pattern.to_string(),
                reason: format!("Invalid glob: {}", e),
            }
        })?;

        Ok(Self { regex })
    }

    pub fn matches(&self, path: &str) -> bool {
        let normalized = path.replace('\\', "/");
        let normalized = normalized.strip_prefix("./").unwrap_or(&normalized);
        self.regex.is_match(normalized)
    }
}

fn glob_to_regex(pattern: &str) -> String {
    let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::from("^");
    let mut in_group = false;
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' if chars.get(i + 1) == Some(&'*') => {
                if chars.get(i + 2) == Some(&'/') {
                    out.push_str("(?:.*/)?");
                    i += 3;
                } else {
                    out.push_str(".*");
                    i += 2;
                }
                continue;
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            '{' if !in_group => {
                in_group = true;
                out.push_str("(?:");
            }
            '}' if in_group => {
                in_group = false;
                out.push(')');
            }
            ',' if in_group => out.push('|'),
            c => out.push_str(&regex::escape(&c.to_string())),
        }
        i += 1;
    }

    out.push('$');
    out
}
