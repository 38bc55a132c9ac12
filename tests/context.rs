use yangwalk::context::{Context, ContextFlags};
use yangwalk::ffi;
use yangwalk::schema::{ModuleType, SchemaInputFormat};

static SEARCH_DIR: &str = "./assets/yang";
static DATA_DIR: &str = "./assets/data";
static MODULE_NAME: &str = "turing-machine";
static MODULE_REVISION: &str = "2013-12-27";
static MODULE_PATH: &str = "./assets/yang/turing-machine@2013-12-27.yang";

static OLD_MODULE: &str = r#"
module turing-machine {
  yang-version 1.1;
  namespace "http://example.net/turing-machine";
  prefix tm;

  revision 2013-01-01;

  container turing-machine {
    leaf state {
      type uint16;
    }
  }
}
"#;

fn flags() -> ContextFlags {
    ContextFlags::NO_YANGLIBRARY | ContextFlags::DISABLE_SEARCHDIR_CWD
}

fn canonical(path: &str) -> String {
    std::fs::canonicalize(path)
        .expect("Failed to canonicalize path")
        .to_str()
        .unwrap()
        .to_owned()
}

#[test]
fn context_open_missing_dir() {
    let error = Context::open("./assets/no-such-dir", flags())
        .expect_err("Context created on a missing directory");
    assert_ne!(error.errcode, ffi::LY_ERR::LY_SUCCESS);
}

#[test]
fn context_searchdirs() {
    let mut ctx =
        Context::open(SEARCH_DIR, flags()).expect("Failed to create context");
    assert_eq!(
        ctx.searchdirs().collect::<Vec<&str>>(),
        vec![canonical(SEARCH_DIR)]
    );

    ctx.set_searchdir(DATA_DIR)
        .expect("Failed to set YANG search directory");
    assert_eq!(
        ctx.searchdirs().collect::<Vec<&str>>(),
        vec![canonical(SEARCH_DIR), canonical(DATA_DIR)]
    );

    // A failed load leaves an error record behind.
    assert!(ctx.load_module("no-such-module", None, &[]).is_err());

    // Duplicates are rejected without a message of their own.
    let error = ctx
        .set_searchdir(DATA_DIR)
        .expect_err("Duplicate search directory accepted");
    assert_eq!(error.errcode, ffi::LY_ERR::LY_EEXIST);
    assert!(error.msg.is_none());
    assert!(error.path.is_none());
    assert!(error.apptag.is_none());

    ctx.unset_searchdir_last(1)
        .expect("Failed to unset last search directory");
    assert_eq!(
        ctx.searchdirs().collect::<Vec<&str>>(),
        vec![canonical(SEARCH_DIR)]
    );

    ctx.unset_searchdirs()
        .expect("Failed to unset search directories");
    assert_eq!(ctx.searchdirs().count(), 0);
}

#[test]
fn context_without_searchdirs() {
    let ctx = Context::new(flags()).expect("Failed to create context");
    assert_eq!(ctx.searchdirs().count(), 0);
    assert!(ctx.get_options().contains(ContextFlags::NO_YANGLIBRARY));
}

#[test]
fn context_get_module() {
    let mut ctx =
        Context::open(SEARCH_DIR, flags()).expect("Failed to create context");
    assert!(ctx.get_module_latest(MODULE_NAME).is_none());

    let module = ctx
        .load_module(MODULE_NAME, None, &[])
        .expect("Failed to load module");
    assert_eq!(module.name(), MODULE_NAME);

    // Lookups without revision only match modules without revision.
    assert!(ctx.get_module(MODULE_NAME, None).is_none());
    assert_eq!(
        ctx.get_module(MODULE_NAME, Some(MODULE_REVISION))
            .expect("Module not found")
            .name(),
        MODULE_NAME
    );
    assert_eq!(
        ctx.get_module_latest(MODULE_NAME)
            .expect("Module not found")
            .revision(),
        Some(MODULE_REVISION)
    );
    assert!(ctx.get_module_implemented(MODULE_NAME).is_some());
}

#[test]
fn context_get_or_load_module() {
    let mut ctx =
        Context::open(SEARCH_DIR, flags()).expect("Failed to create context");

    let module = ctx
        .get_or_load_module(MODULE_NAME, None)
        .expect("Failed to load module");
    assert_eq!(module.name(), MODULE_NAME);
    assert_eq!(module.revision(), Some(MODULE_REVISION));

    // The second call finds the module already present.
    let count = ctx.modules().count();
    let module = ctx
        .get_or_load_module(MODULE_NAME, Some(MODULE_REVISION))
        .expect("Failed to find module");
    assert_eq!(module.name(), MODULE_NAME);
    assert_eq!(ctx.modules().count(), count);
}

#[test]
fn context_load_missing_module() {
    let mut ctx =
        Context::open(SEARCH_DIR, flags()).expect("Failed to create context");
    let error = ctx
        .load_module("no-such-module", None, &[])
        .expect_err("Missing module loaded");
    assert_ne!(error.errcode, ffi::LY_ERR::LY_SUCCESS);
    assert!(ctx.get_module_latest("no-such-module").is_none());
}

#[test]
fn context_modules() {
    let mut ctx =
        Context::open(SEARCH_DIR, flags()).expect("Failed to create context");
    let internal = ctx.internal_module_count() as usize;
    assert_eq!(ctx.modules().count(), internal);
    assert!(ctx.modules().any(|module| module.name() == "yang"));

    ctx.load_module(MODULE_NAME, None, &[])
        .expect("Failed to load module");
    assert_eq!(ctx.modules().count(), internal + 1);

    let module = ctx
        .modules()
        .find(|module| module.name() == MODULE_NAME)
        .expect("Module not listed");
    assert_eq!(module.prefix(), "tm");
    assert_eq!(module.module_type(), ModuleType::Implemented);
}

#[test]
fn context_logger_installed_once() {
    let ctx = Context::new(flags()).expect("Failed to create context");
    ctx.set_log_level_warn();
    ctx.init_default_logger()
        .expect("Failed to install libyang logger");
    assert!(ctx.init_default_logger().is_err());
}

#[test]
fn context_get_or_load_module_implemented() {
    let mut ctx =
        Context::open(SEARCH_DIR, flags()).expect("Failed to create context");
    ctx.parse_module_str(OLD_MODULE, SchemaInputFormat::YANG)
        .expect("Failed to parse module");
    let count = ctx.modules().count();

    // The implemented revision is returned, even though a newer one is
    // available in the search directory.
    let module = ctx
        .get_or_load_module(MODULE_NAME, None)
        .expect("Failed to find module");
    assert_eq!(module.revision(), Some("2013-01-01"));
    assert!(module.is_implemented());
    assert_eq!(ctx.modules().count(), count);
}

#[test]
fn context_parse_module_path() {
    let mut ctx = Context::new(flags()).expect("Failed to create context");

    let module = ctx
        .parse_module_path(MODULE_PATH, SchemaInputFormat::YANG)
        .expect("Failed to parse module");
    assert_eq!(module.name(), MODULE_NAME);
    assert_eq!(module.revision(), Some(MODULE_REVISION));
    assert_eq!(module.module_type(), ModuleType::Implemented);
    assert!(ctx
        .get_module(MODULE_NAME, Some(MODULE_REVISION))
        .is_some());
}

#[test]
fn context_parse_module_str() {
    let mut ctx = Context::new(flags()).expect("Failed to create context");

    let module = ctx
        .parse_module_str(OLD_MODULE, SchemaInputFormat::YANG)
        .expect("Failed to parse module");
    assert_eq!(module.name(), MODULE_NAME);
    assert_eq!(module.prefix(), "tm");
    assert_eq!(module.filepath(), None);
    assert_eq!(
        module.traverse().map(|snode| snode.name().to_owned()).collect::<Vec<_>>(),
        vec!["turing-machine", "state"]
    );

    let error = ctx
        .parse_module_str("module broken {", SchemaInputFormat::YANG)
        .expect_err("Truncated module accepted");
    assert_ne!(error.errcode, ffi::LY_ERR::LY_SUCCESS);
    assert!(ctx.get_module_latest("broken").is_none());
}
