//! Built-in pipeline descriptors
//!
//! `npm_package` is the stock packaging pipeline an npm-style package starts
//! from. The two builder shapes below derive project pipelines from it: one
//! wires in a local test environment, the other forwards the base untouched.

use crate::core::descriptor::PipelineDescriptor;
use crate::core::flow::Flow;
use crate::core::step::Step;

/// The stock npm package pipeline
///
/// Ten steps driven through `yarn`, a `prod` flow covering the full
/// check/build/publish path and a shorter `dev` flow.
pub fn npm_package() -> PipelineDescriptor {
    PipelineDescriptor::new(
        vec![
            Step::new("checks", "yarn lint"),
            Step::new("init", "yarn install"),
            Step::new("sync-deps", "yarn sync-deps"),
            Step::new("build-dev", "yarn build:dev"),
            Step::new("build-prod", "yarn build:prod"),
            Step::new("test", "yarn test"),
            Step::new("test-coverage", "yarn test-coverage"),
            Step::new("doc", "yarn doc"),
            Step::new("publish-local", "yarn publish-local"),
            Step::new("publish-remote", "yarn publish-remote"),
        ],
        vec![
            Flow::new(
                "prod",
                [
                    "checks > init > sync-deps > build-prod > test > publish-local > publish-remote",
                    "build-prod > doc > publish-local",
                ],
            ),
            Flow::new("dev", ["init > build-dev > test"]),
        ],
    )
}

/// The base pipeline extended with a local test environment
///
/// Appends the `create-test-env` and `start-test-env` steps and replaces the
/// `prod` flow with one where the test suite and its coverage run against a
/// freshly created and started environment. Every other flow survives.
pub fn with_test_env() -> PipelineDescriptor {
    npm_package()
        .append_steps([
            Step::new("create-test-env", "yarn create-test-env"),
            Step::new("start-test-env", "yarn start-test-env"),
        ])
        .override_flow(Flow::new(
            "prod",
            [
                "checks > init > sync-deps > build-prod > test > publish-local > publish-remote",
                "create-test-env > start-test-env > test > test-coverage",
                "build-prod > doc > publish-local",
            ],
        ))
}

/// The base pipeline forwarded without modification
pub fn pass_through() -> PipelineDescriptor {
    npm_package()
}
