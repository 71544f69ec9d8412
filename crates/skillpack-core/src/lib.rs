//! Skillpack core
//!
//! Validation and packaging of skill folders. A skill folder holds a
//! `SKILL.md` document whose YAML frontmatter describes the skill:
//!
//! ```yaml
//! ---
//! name: my-skill
//! description: Does a thing
//! license: MIT
//! ---
//!
//! # My Skill
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use skillpack_core::{EnvironmentCollector, NativeZip, Packager, validate_skill};
//! use std::path::Path;
//!
//! let skill = validate_skill("skills/my-skill")?;
//! println!("{}", skill.message());
//!
//! let mut packager = Packager::new(NativeZip, EnvironmentCollector::new());
//! let archive = packager.package(Path::new("skills/my-skill"), Some(Path::new("dist")), &mut ())?;
//! println!("{}", archive.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod archiver;
pub mod collector;
pub mod envfile;
pub mod error;
pub mod frontmatter;
pub mod packager;
pub mod scanner;
pub mod validator;

/// Name of the metadata document inside a skill folder
pub const SKILL_FILE: &str = "SKILL.md";

pub use archiver::{ArchiveStatus, Archiver, NativeZip, ZipCommand};
pub use collector::{EnvCollector, EnvironmentCollector, mask_value, resolve_value};
pub use error::{PackageError, ValidationError, ValidationErrorKind};
pub use packager::{PackageReporter, Packager};
pub use scanner::scan_env_vars;
pub use validator::{SkillMetadata, VALID_MESSAGE, ValidSkill, validate_skill};
