//! Health reporter: a light deployment snapshot for smoke tests.

use deploy_probe_api::v1::{
    CachePolicy, ExecutionContext, HandlerRequest, HandlerResponse, PreflightDto, ResponseStatus,
    json_response,
};
use deploy_probe_config::{
    ENV_AWS_REGION, ENV_BUILD_ID, ENV_ENABLE_DEV_TOOLS, ENV_FIREBASE_PROJECT_ID,
    ENV_FLUTTER_BUILD_MODE, ENV_FLUTTER_WEB_BUILD_WITH_SOURCEMAPS, ENV_FLUTTER_WEB_DEBUG,
    ENV_NODE_ENV, EnvSnapshot,
};
use deploy_probe_domain::{
    ConfigEcho, DeploymentInfo, FeatureFlags, HealthFault, HealthReport, LOCAL_BUILD,
    NOT_CONFIGURED, UNKNOWN, flag_enabled, value_or_sentinel,
};
use deploy_probe_ports::Clock;
use deploy_probe_shared::{ErrorEnvelope, Result};
use serde_json::Value;

/// Handle one health reporter invocation.
///
/// Never fails: faults while assembling or serializing the report become a
/// 500 with a [`HealthFault`] body. Every body is compact except the report.
pub fn report_health(
    clock: &dyn Clock,
    request: &HandlerRequest,
    context: &ExecutionContext,
    env: &EnvSnapshot,
) -> HandlerResponse {
    let result = if request.method.is_preflight() {
        json_response(
            ResponseStatus::Ok,
            CachePolicy::NoStore,
            &PreflightDto::default(),
            false,
        )
    } else {
        build_health_report(clock, context, env).and_then(|report| {
            json_response(ResponseStatus::Ok, CachePolicy::NoStore, &report, true)
        })
    };

    result.unwrap_or_else(|error| fault_response(clock, &error))
}

/// Assemble the health report for a snapshot.
pub fn build_health_report(
    clock: &dyn Clock,
    context: &ExecutionContext,
    env: &EnvSnapshot,
) -> Result<HealthReport> {
    let timestamp = clock.now();
    let deployment = DeploymentInfo {
        netlify_context: context
            .client_context
            .clone()
            .unwrap_or_else(|| Value::String(UNKNOWN.to_owned())),
        region: value_or_sentinel(env.get(ENV_AWS_REGION)?, UNKNOWN),
        build_id: value_or_sentinel(env.get(ENV_BUILD_ID)?, LOCAL_BUILD),
    };
    let config = ConfigEcho {
        node_env: value_or_sentinel(env.get(ENV_NODE_ENV)?, UNKNOWN),
        flutter_build_mode: value_or_sentinel(env.get(ENV_FLUTTER_BUILD_MODE)?, UNKNOWN),
        firebase_project_id: value_or_sentinel(env.get(ENV_FIREBASE_PROJECT_ID)?, NOT_CONFIGURED),
    };
    let features = FeatureFlags {
        debug_mode: flag_enabled(env.get(ENV_FLUTTER_WEB_DEBUG)?),
        source_maps: flag_enabled(env.get(ENV_FLUTTER_WEB_BUILD_WITH_SOURCEMAPS)?),
        dev_tools: flag_enabled(env.get(ENV_ENABLE_DEV_TOOLS)?),
    };

    Ok(HealthReport::new(timestamp, deployment, config, features))
}

fn fault_response(clock: &dyn Clock, error: &ErrorEnvelope) -> HandlerResponse {
    tracing::error!(
        event = "dev_health.fault",
        code = %error.code,
        error = %error,
        "health check failed"
    );
    let fault = HealthFault::new(clock.now(), error.message.clone());
    json_response(
        ResponseStatus::InternalServerError,
        CachePolicy::NoStore,
        &fault,
        false,
    )
    .unwrap_or_else(|_| {
        HandlerResponse::new(
            ResponseStatus::InternalServerError,
            CachePolicy::NoStore,
            fallback_fault_body(&fault),
        )
    })
}

/// Fault body built without serde, keeping the health fault fields.
fn fallback_fault_body(fault: &HealthFault) -> String {
    format!(
        r#"{{"status":"{}","environment":"{}","timestamp":"{}","error":"internal error"}}"#,
        fault.status,
        fault.environment,
        fault.timestamp.to_iso8601()
    )
}
