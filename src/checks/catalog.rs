//! The fixed check list for an HGD installation.

use super::probe::{CapabilityProbe, CommandProbe, InterpreterVersionProbe};
use super::smoke::SmokeTestProbe;
use super::Check;
use crate::config::ValidatorConfig;
use crate::runner::CheckGroup;

/// Title of the report.
pub const TITLE: &str = "HGD Installation Validation";

/// Oldest supported Python.
pub const MIN_PYTHON: (u32, u32) = (3, 9);

/// Third-party modules HGD imports at runtime, as (module, display name).
pub const REQUIRED_MODULES: &[(&str, &str)] = &[
    ("numpy", "numpy"),
    ("matplotlib", "matplotlib"),
    ("scipy", "scipy"),
    ("tqdm", "tqdm"),
    ("json5", "json5"),
];

/// Submodules that must import for the package to be usable.
const PACKAGE_SUBMODULES: &[&str] = &["main", "params", "operators"];

/// The compiled motion kernel.
const EXTENSION_MODULE: &str = "motion.d2q4_cpp";

/// Build the ordered check groups for `config`.
///
/// Order: interpreter, third-party modules, package import, then the gated
/// C++ extension and smoke test, then optional tools.
pub fn hgd_groups(config: &ValidatorConfig) -> Vec<CheckGroup> {
    vec![
        interpreter_group(config),
        modules_group(config),
        package_group(config),
        extension_group(config),
        smoke_group(config),
        tools_group(config),
    ]
}

fn interpreter_group(config: &ValidatorConfig) -> CheckGroup {
    CheckGroup::new("Checking Python version")
        .with_icon("📋")
        .with_check(Check::required(
            "Python version",
            InterpreterVersionProbe::new(&config.python, MIN_PYTHON, config.import_timeout)
                .with_message_limit(config.message_limit),
        ))
}

fn modules_group(config: &ValidatorConfig) -> CheckGroup {
    let checks = REQUIRED_MODULES.iter().map(|(module, package)| {
        let probe = CapabilityProbe::python_import(
            &config.python,
            &[module.to_string()],
            config.import_timeout,
        )
        .with_messages(
            format!("{} is installed", package),
            format!("{} is NOT installed", package),
        )
        .with_message_limit(config.message_limit);
        Check::required(*package, probe)
    });

    CheckGroup::new("Checking required Python packages")
        .with_icon("📦")
        .with_checks(checks)
}

fn package_group(config: &ValidatorConfig) -> CheckGroup {
    let package = &config.package;
    let mut modules = vec![package.clone()];
    modules.extend(
        PACKAGE_SUBMODULES
            .iter()
            .map(|sub| format!("{}.{}", package, sub)),
    );

    let probe = CapabilityProbe::python_import(&config.python, &modules, config.import_timeout)
        .with_messages(
            format!("{} package is properly installed", package),
            format!("{} import failed", package),
        )
        .with_message_limit(config.message_limit);

    CheckGroup::new(format!("Checking {} installation", package))
        .with_icon("🔧")
        .with_check(Check::required(format!("{} package", package), probe))
}

fn extension_group(config: &ValidatorConfig) -> CheckGroup {
    let module = format!("{}.{}", config.package, EXTENSION_MODULE);
    let probe = CapabilityProbe::python_import(&config.python, &[module], config.import_timeout)
        .with_messages(
            "C++ extension (d2q4_cpp) is available",
            "C++ extension is NOT available (compilation may have failed)",
        )
        .with_message_limit(config.message_limit);

    CheckGroup::gated("Checking C++ extension")
        .with_icon("⚙️")
        .with_check(
            Check::advisory("C++ extension", probe)
                .with_note("Python-only mode will still work but be slower"),
        )
}

fn smoke_group(config: &ValidatorConfig) -> CheckGroup {
    let probe = SmokeTestProbe::new(&config.python, &config.package, config.smoke_timeout)
        .with_message_limit(config.message_limit);

    CheckGroup::gated("Running minimal simulation")
        .with_icon("🧪")
        .with_check(Check::required("Minimal simulation", probe))
}

fn tools_group(config: &ValidatorConfig) -> CheckGroup {
    CheckGroup::new("Checking optional tools")
        .with_icon("🛠️")
        .with_check(
            Check::advisory(
                "ffmpeg (for videos)",
                CommandProbe::new("ffmpeg", config.tool_timeout),
            )
            .with_note("You can still run simulations, just no video output"),
        )
        .with_check(Check::advisory(
            "CMake",
            CommandProbe::new("cmake", config.tool_timeout),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::Severity;

    fn headings(groups: &[CheckGroup]) -> Vec<&str> {
        groups.iter().map(|g| g.heading()).collect()
    }

    #[test]
    fn groups_follow_fixed_order() {
        let groups = hgd_groups(&ValidatorConfig::default());
        assert_eq!(
            headings(&groups),
            vec![
                "Checking Python version",
                "Checking required Python packages",
                "Checking HGD installation",
                "Checking C++ extension",
                "Running minimal simulation",
                "Checking optional tools",
            ]
        );
    }

    #[test]
    fn only_extension_and_smoke_are_gated() {
        let groups = hgd_groups(&ValidatorConfig::default());
        let gated: Vec<&str> = groups
            .iter()
            .filter(|g| g.is_gated())
            .map(|g| g.heading())
            .collect();
        assert_eq!(gated, vec!["Checking C++ extension", "Running minimal simulation"]);
    }

    #[test]
    fn severities_match_policy() {
        let groups = hgd_groups(&ValidatorConfig::default());
        let severity_of = |name: &str| {
            groups
                .iter()
                .flat_map(|g| g.checks())
                .find(|c| c.name() == name)
                .map(|c| c.severity())
                .unwrap()
        };

        assert_eq!(severity_of("Python version"), Severity::Required);
        for (_, package) in REQUIRED_MODULES {
            assert_eq!(severity_of(*package), Severity::Required);
        }
        assert_eq!(severity_of("HGD package"), Severity::Required);
        assert_eq!(severity_of("Minimal simulation"), Severity::Required);
        assert_eq!(severity_of("C++ extension"), Severity::Advisory);
        assert_eq!(severity_of("ffmpeg (for videos)"), Severity::Advisory);
        assert_eq!(severity_of("CMake"), Severity::Advisory);
    }

    #[test]
    fn module_checks_keep_declaration_order() {
        let groups = hgd_groups(&ValidatorConfig::default());
        let names: Vec<&str> = groups[1].checks().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["numpy", "matplotlib", "scipy", "tqdm", "json5"]);
    }

    #[test]
    fn advisory_checks_carry_notes() {
        let groups = hgd_groups(&ValidatorConfig::default());
        let extension = &groups[3].checks()[0];
        let ffmpeg = &groups[5].checks()[0];
        let cmake = &groups[5].checks()[1];

        assert!(extension.note().unwrap().contains("slower"));
        assert!(ffmpeg.note().unwrap().contains("no video output"));
        assert!(cmake.note().is_none());
    }

    #[test]
    fn every_group_has_an_icon() {
        let groups = hgd_groups(&ValidatorConfig::default());
        assert!(groups.iter().all(|g| g.icon().is_some()));
    }
}
