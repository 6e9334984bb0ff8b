//! The concrete build pipelines.

use crate::pipeline::types::{Pipeline, Presentation, Step};
use deploy_probe_core::HostOs;
use std::path::Path;

/// Name of the aggregate build pipeline.
pub const BUILD_ALL: &str = "build-all";
/// Name of the Flutter mobile pipeline.
pub const BUILD_FLUTTER: &str = "build-flutter";
/// Flutter app directory, relative to the project root.
pub const FLUTTER_DIR: &str = "apps/mobile";
/// React web app directory, relative to the project root.
pub const WEB_DIR: &str = "apps/web";

const FLUTTER: &str = "flutter";

/// Regenerate Flutter dependencies and smoke-build the mobile app.
///
/// Every step is critical.
pub fn build_flutter_pipeline() -> Pipeline {
    Pipeline {
        name: BUILD_FLUTTER,
        banner: "Regenerating Flutter dependencies...".to_owned(),
        steps: vec![
            Step::run("flutter version", FLUTTER, ["--version"]),
            Step::change_dir("enter mobile app", FLUTTER_DIR),
            Step::run("flutter clean", FLUTTER, ["clean"]),
            Step::run("flutter pub get", FLUTTER, ["pub", "get"]),
            Step::run("flutter analyze", FLUTTER, ["analyze"]),
            Step::expect_file(
                "pubspec.lock",
                "pubspec.lock",
                "pubspec.lock regenerated successfully",
                "pubspec.lock generation failed",
            ),
            Step::notice("test builds", "Testing Flutter builds..."),
            Step::run("flutter build apk", FLUTTER, ["build", "apk", "--debug"]),
            Step::run("flutter build ios", FLUTTER, ["build", "ios", "--debug"])
                .only_on(HostOs::MacOs, "Skipping iOS build: not running on macOS."),
        ],
        summary: Vec::new(),
        abort_prefix: "Flutter setup failed".to_owned(),
        presentation: Presentation::Plain,
    }
}

/// Build the mobile and web apps. Failures are tolerated.
///
/// The mobile step re-invokes `self_exe build-flutter` as a child so its
/// abort only ends that child. `child_args` follow the subcommand; they must
/// carry anything the child cannot recover on its own, such as an absolute
/// project root.
pub fn build_all_pipeline(self_exe: &Path, child_args: &[String]) -> Pipeline {
    let mobile_args = std::iter::once(BUILD_FLUTTER.to_owned()).chain(child_args.iter().cloned());
    Pipeline {
        name: BUILD_ALL,
        banner: "Building all platforms".to_owned(),
        steps: vec![
            Step::run("Flutter Mobile", self_exe, mobile_args).non_critical(),
            Step::run("React Web", "npm", ["run", "build:web"])
                .in_dir(WEB_DIR)
                .non_critical(),
        ],
        summary: vec![
            "All builds completed!".to_owned(),
            "Mobile: Flutter app ready in build/app/".to_owned(),
            "Web: React app ready in apps/web/build/".to_owned(),
        ],
        abort_prefix: "Build failed".to_owned(),
        presentation: Presentation::Announced,
    }
}
