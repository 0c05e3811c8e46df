//! Build lifecycle integration for page actions.
//!
//! Hooks the core mirror and manifest logic into a static build: the setup
//! stage copies every content document to its raw `.md` mirror and emits the
//! client config module, the finalize stage writes `llms.txt`.

pub mod builder;
pub mod copy;
pub mod integration;
pub mod pages;

pub use builder::{BuildError, BuildResult, FinalizeResult, SetupResult, StaticBuilder};
pub use copy::{execute_copy, CopyTarget, RenameFn};
pub use integration::{
    BuildDone, BuildSetup, GeneratedModule, Integration, PageActions, SiteSettings,
    CONFIG_MODULE_SPECIFIER, DEFAULT_EXTENSIONS, DEFAULT_MODULE_PATH,
};
pub use pages::discover_pages;
