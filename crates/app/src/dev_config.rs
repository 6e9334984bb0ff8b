//! Config validator: classify the deployment variables and report a verdict.

use deploy_probe_api::v1::{
    CachePolicy, ErrorBodyDto, HandlerRequest, HandlerResponse, ResponseStatus,
    error_envelope_to_error_body, json_response,
};
use deploy_probe_config::{
    ENV_BUILD_ID, ENV_FLUTTER_BUILD_MODE, ENV_FLUTTER_WEB_BUILD_WITH_SOURCEMAPS,
    ENV_FLUTTER_WEB_DEBUG, ENV_FLUTTER_WEB_USE_SKIA, ENV_NETLIFY_BRANCH, ENV_NETLIFY_DEV,
    ENV_NETLIFY_SITE_ID, ENV_NODE_ENV, EnvSnapshot, OPTIONAL_VARS, PRODUCTION, REQUIRED_VARS,
};
use deploy_probe_domain::{
    ConfigReport, ConfigSummary, FlutterSettings, NOT_SET, NetlifySettings, UNKNOWN, VarSpec,
    VariableCheck, VariableChecks, Validation, flag_enabled, value_or_sentinel,
};
use deploy_probe_ports::Clock;
use deploy_probe_shared::{ErrorEnvelope, Result};

/// Body message for the production gate.
pub const PRODUCTION_GATE_MESSAGE: &str = "Config validation not available in production";

/// Handle one config validator invocation.
///
/// Never fails: faults are converted into a 500 response here.
pub fn validate_config(
    clock: &dyn Clock,
    request: &HandlerRequest,
    env: &EnvSnapshot,
) -> HandlerResponse {
    if request.method.is_preflight() {
        return HandlerResponse::new(ResponseStatus::Ok, CachePolicy::NoCache, String::new());
    }

    match respond(clock, env) {
        Ok(response) => response,
        Err(error) => fault_response(&error),
    }
}

fn respond(clock: &dyn Clock, env: &EnvSnapshot) -> Result<HandlerResponse> {
    if env.get(ENV_NODE_ENV)? == Some(PRODUCTION) {
        tracing::info!(
            event = "dev_config.gated",
            node_env = PRODUCTION,
            "config validation refused in production"
        );
        let body = ErrorBodyDto {
            error: PRODUCTION_GATE_MESSAGE.to_owned(),
        };
        return json_response(ResponseStatus::Forbidden, CachePolicy::NoCache, &body, false);
    }

    let report = build_config_report(clock, env)?;
    let status = if report.summary.is_healthy() {
        ResponseStatus::Ok
    } else {
        ResponseStatus::BadRequest
    };
    tracing::debug!(
        event = "dev_config.report",
        status = status.code(),
        required_missing = report.summary.required_missing,
        optional_missing = report.summary.optional_missing,
        total_configured = report.summary.total_configured,
        "config report assembled"
    );
    json_response(status, CachePolicy::NoCache, &report, true)
}

/// Assemble the config report for a snapshot.
///
/// Fails only when a variable the report reads is unreadable.
pub fn build_config_report(clock: &dyn Clock, env: &EnvSnapshot) -> Result<ConfigReport> {
    let timestamp = clock.now();
    let mut summary = ConfigSummary::default();
    let required = check_table(&REQUIRED_VARS, env, &mut summary)?;
    let optional = check_table(&OPTIONAL_VARS, env, &mut summary)?;

    let flutter = FlutterSettings {
        build_mode: value_or_sentinel(env.get(ENV_FLUTTER_BUILD_MODE)?, NOT_SET),
        web_renderer: value_or_sentinel(env.get(ENV_FLUTTER_WEB_USE_SKIA)?, NOT_SET),
        debug: flag_enabled(env.get(ENV_FLUTTER_WEB_DEBUG)?),
        source_maps: flag_enabled(env.get(ENV_FLUTTER_WEB_BUILD_WITH_SOURCEMAPS)?),
    };
    let netlify = NetlifySettings {
        site_id: env
            .get(ENV_NETLIFY_SITE_ID)?
            .is_some_and(|value| !value.is_empty()),
        is_dev: flag_enabled(env.get(ENV_NETLIFY_DEV)?),
        branch: value_or_sentinel(env.get(ENV_NETLIFY_BRANCH)?, NOT_SET),
        build_id: value_or_sentinel(env.get(ENV_BUILD_ID)?, NOT_SET),
    };

    Ok(ConfigReport {
        timestamp,
        environment: value_or_sentinel(env.get(ENV_NODE_ENV)?, UNKNOWN),
        validation: Validation {
            required,
            optional,
            flutter,
            netlify,
        },
        summary,
    })
}

fn check_table(
    table: &[VarSpec],
    env: &EnvSnapshot,
    summary: &mut ConfigSummary,
) -> Result<VariableChecks> {
    let mut checks = VariableChecks::default();
    for spec in table {
        let check = VariableCheck::evaluate(spec.class, env.get(spec.name)?);
        summary.record(spec.class, &check);
        checks.push(spec.name, check);
    }
    Ok(checks)
}

fn fault_response(error: &ErrorEnvelope) -> HandlerResponse {
    tracing::error!(
        event = "dev_config.fault",
        code = %error.code,
        error = %error,
        "config validation failed"
    );
    json_response(
        ResponseStatus::InternalServerError,
        CachePolicy::NoCache,
        &error_envelope_to_error_body(error),
        false,
    )
    .unwrap_or_else(|_| {
        HandlerResponse::new(
            ResponseStatus::InternalServerError,
            CachePolicy::NoCache,
            FALLBACK_FAULT_BODY.to_owned(),
        )
    })
}

/// Body used when even the fault body cannot be serialized.
const FALLBACK_FAULT_BODY: &str = r#"{"error":"internal error"}"#;
