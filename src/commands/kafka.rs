//! # Kafka Command Handler
//!
//! This module handles Kafka logging endpoint commands including creation,
//! listing, describing, updating, and deletion. Kafka endpoints are scoped
//! to a service version, so mutating verbs go through editable-version
//! resolution (and autoclone) before their one API call.

use std::io::Write;

use getopts::{Matches, Options};

use crate::commands::Globals;
use crate::commands::shared::{self, dispatch_command};
use crate::errors::Error;
use crate::kafka::{self, CreateKafkaInput, Kafka, UpdateKafkaInput};
use crate::text;

const KAFKA_USAGE: &str =
    "Usage: merictl logging kafka <create|list|describe|update|delete> [flags...]";

/// Handles all Kafka logging endpoint commands.
pub async fn handle_kafka_command(args: &[String], globals: &mut Globals<'_>) -> Result<(), Error> {
    dispatch_command!("kafka", KAFKA_USAGE, args, globals, {
        "create" => handle_kafka_create,
        "list" => handle_kafka_list,
        "describe" => handle_kafka_describe,
        "get" => handle_kafka_describe,
        "update" => handle_kafka_update,
        "delete" => handle_kafka_delete,
    })
}

/// Adds the entity field flags shared by create and update.
fn field_opts(opts: &mut Options) {
    opts.optopt("", "topic", "The Kafka topic to send logs to", "TOPIC");
    opts.optopt("", "brokers", "Comma-separated list of Kafka brokers", "BROKERS");
    opts.optopt("", "required-acks", "The number of acknowledgements a leader must receive", "ACKS");
    opts.optopt("", "compression-codec", "The codec used for compression of the logs", "CODEC");
    opts.optflag("", "use-tls", "Use TLS for the connection to Kafka");
    opts.optopt("", "tls-ca-cert", "A secure certificate to authenticate the server with", "PEM");
    opts.optopt("", "tls-client-cert", "The client certificate used to make authenticated requests", "PEM");
    opts.optopt("", "tls-client-key", "The client private key used to make authenticated requests", "PEM");
    opts.optopt("", "tls-hostname", "The hostname used to verify the server's certificate", "HOST");
    opts.optopt("", "format", "Apache style log formatting", "FORMAT");
    opts.optopt("", "format-version", "The version of the custom logging format", "N");
    opts.optopt("", "response-condition", "The name of an existing condition to apply", "NAME");
    opts.optopt("", "placement", "Where in the delivery pipeline the logging call is placed", "PLACEMENT");
    opts.optflag("", "parse-log-keyvals", "Parse key-value pairs within the log format");
    opts.optopt("", "max-batch-size", "The maximum size of the log batch in bytes", "BYTES");
    opts.optflag("", "use-sasl", "Enable SASL authentication");
    opts.optopt("", "auth-method", "SASL authentication method: plain, scram-sha-256, or scram-sha-512", "METHOD");
    opts.optopt("", "username", "SASL username", "USER");
    opts.optopt("", "password", "SASL password", "PASSWORD");
}

/// Validates the SASL flag group. `--use-sasl` requires the credential
/// flags, and the credential flags are meaningless without it.
fn sasl_flags(
    matches: &Matches,
) -> Result<(Option<String>, Option<String>, Option<String>), Error> {
    let auth_method = matches.opt_str("auth-method");
    let user = matches.opt_str("username");
    let password = matches.opt_str("password");
    if matches.opt_present("use-sasl") {
        if auth_method.is_none() {
            return Err(Error::MissingFlag("auth-method"));
        }
        if user.is_none() {
            return Err(Error::MissingFlag("username"));
        }
        if password.is_none() {
            return Err(Error::MissingFlag("password"));
        }
    } else if auth_method.is_some() || user.is_some() || password.is_some() {
        return Err(Error::Argument(
            "--auth-method, --username and --password are only valid with the --use-sasl flag"
                .to_string(),
        ));
    }
    Ok((auth_method, user, password))
}

/// Handles Kafka endpoint creation.
async fn handle_kafka_create(args: &[String], globals: &mut Globals<'_>) -> Result<(), Error> {
    let mut opts = Options::new();
    shared::service_opts(&mut opts);
    shared::version_opts(&mut opts);
    shared::autoclone_opt(&mut opts);
    opts.optopt("", "name", "The name of the Kafka logging endpoint", "NAME");
    field_opts(&mut opts);
    let matches = shared::parse(&opts, args, KAFKA_USAGE)?;

    let name = shared::required_flag(&matches, "name")?;
    let topic = shared::required_flag(&matches, "topic")?;
    let brokers = shared::required_flag(&matches, "brokers")?;
    let format_version = shared::optional_u32(&matches, "format-version")?;
    let request_max_bytes = shared::optional_u64(&matches, "max-batch-size")?;
    let (auth_method, user, password) = sasl_flags(&matches)?;

    let service_id = shared::resolve_service(globals, &matches)?;
    let version = shared::resolve_editable_version(globals, &matches, &service_id).await?;

    let input = CreateKafkaInput {
        service_id,
        version,
        name,
        topic,
        brokers,
        required_acks: matches.opt_str("required-acks"),
        compression_codec: matches.opt_str("compression-codec"),
        use_tls: matches.opt_present("use-tls").then_some(true),
        tls_ca_cert: matches.opt_str("tls-ca-cert"),
        tls_client_cert: matches.opt_str("tls-client-cert"),
        tls_client_key: matches.opt_str("tls-client-key"),
        tls_hostname: matches.opt_str("tls-hostname"),
        format: matches.opt_str("format"),
        format_version,
        response_condition: matches.opt_str("response-condition"),
        placement: matches.opt_str("placement"),
        parse_log_keyvals: matches.opt_present("parse-log-keyvals").then_some(true),
        request_max_bytes,
        auth_method,
        user,
        password,
    };

    let endpoint = kafka::create(&globals.client, &input).await?;
    text::success(
        globals.out,
        &format!(
            "Created Kafka logging endpoint {} (service {} version {})",
            endpoint.name, endpoint.service_id, endpoint.version
        ),
    );
    Ok(())
}

/// Handles Kafka endpoint listing.
async fn handle_kafka_list(args: &[String], globals: &mut Globals<'_>) -> Result<(), Error> {
    let mut opts = Options::new();
    shared::service_opts(&mut opts);
    shared::version_opts(&mut opts);
    let matches = shared::parse(&opts, args, KAFKA_USAGE)?;

    let service_id = shared::resolve_service(globals, &matches)?;
    let version = shared::resolve_version(globals, &matches, &service_id).await?;
    let endpoints = kafka::list(&globals.client, &service_id, version).await?;

    if shared::verbose(globals, &matches) {
        text::field(globals.out, "", "Version", &version);
        let total = endpoints.len();
        for (i, endpoint) in endpoints.iter().enumerate() {
            let _ = writeln!(globals.out, "\tKafka {}/{}", i + 1, total);
            write_endpoint(globals.out, "\t\t", endpoint);
        }
    } else {
        let mut table = text::Table::new(&["SERVICE", "VERSION", "NAME"]);
        for endpoint in &endpoints {
            table.row(vec![
                endpoint.service_id.clone(),
                endpoint.version.to_string(),
                endpoint.name.clone(),
            ]);
        }
        table.write(globals.out);
    }
    Ok(())
}

/// Handles describing a single Kafka endpoint.
async fn handle_kafka_describe(args: &[String], globals: &mut Globals<'_>) -> Result<(), Error> {
    let mut opts = Options::new();
    shared::service_opts(&mut opts);
    shared::version_opts(&mut opts);
    opts.optopt("", "name", "The name of the Kafka logging endpoint", "NAME");
    let matches = shared::parse(&opts, args, KAFKA_USAGE)?;

    let name = shared::required_flag(&matches, "name")?;
    let service_id = shared::resolve_service(globals, &matches)?;
    let version = shared::resolve_version(globals, &matches, &service_id).await?;

    let endpoint = kafka::get(&globals.client, &service_id, version, &name).await?;
    write_endpoint(globals.out, "", &endpoint);
    Ok(())
}

/// Handles Kafka endpoint update.
async fn handle_kafka_update(args: &[String], globals: &mut Globals<'_>) -> Result<(), Error> {
    let mut opts = Options::new();
    shared::service_opts(&mut opts);
    shared::version_opts(&mut opts);
    shared::autoclone_opt(&mut opts);
    opts.optopt("", "name", "The current name of the Kafka logging endpoint", "NAME");
    opts.optopt("", "new-name", "A new name for the Kafka logging endpoint", "NAME");
    field_opts(&mut opts);
    let matches = shared::parse(&opts, args, KAFKA_USAGE)?;

    let name = shared::required_flag(&matches, "name")?;
    let format_version = shared::optional_u32(&matches, "format-version")?;
    let request_max_bytes = shared::optional_u64(&matches, "max-batch-size")?;
    let (auth_method, user, password) = sasl_flags(&matches)?;

    let service_id = shared::resolve_service(globals, &matches)?;
    let version = shared::resolve_editable_version(globals, &matches, &service_id).await?;

    let input = UpdateKafkaInput {
        service_id,
        version,
        name,
        new_name: matches.opt_str("new-name"),
        topic: matches.opt_str("topic"),
        brokers: matches.opt_str("brokers"),
        required_acks: matches.opt_str("required-acks"),
        compression_codec: matches.opt_str("compression-codec"),
        use_tls: matches.opt_present("use-tls").then_some(true),
        tls_ca_cert: matches.opt_str("tls-ca-cert"),
        tls_client_cert: matches.opt_str("tls-client-cert"),
        tls_client_key: matches.opt_str("tls-client-key"),
        tls_hostname: matches.opt_str("tls-hostname"),
        format: matches.opt_str("format"),
        format_version,
        response_condition: matches.opt_str("response-condition"),
        placement: matches.opt_str("placement"),
        parse_log_keyvals: matches.opt_present("parse-log-keyvals").then_some(true),
        request_max_bytes,
        auth_method,
        user,
        password,
    };

    let endpoint = kafka::update(&globals.client, &input).await?;
    text::success(
        globals.out,
        &format!(
            "Updated Kafka logging endpoint {} (service {} version {})",
            endpoint.name, endpoint.service_id, endpoint.version
        ),
    );
    text::line_break(globals.out);
    write_endpoint(globals.out, "", &endpoint);
    Ok(())
}

/// Handles Kafka endpoint deletion.
async fn handle_kafka_delete(args: &[String], globals: &mut Globals<'_>) -> Result<(), Error> {
    let mut opts = Options::new();
    shared::service_opts(&mut opts);
    shared::version_opts(&mut opts);
    shared::autoclone_opt(&mut opts);
    opts.optopt("", "name", "The name of the Kafka logging endpoint", "NAME");
    let matches = shared::parse(&opts, args, KAFKA_USAGE)?;

    let name = shared::required_flag(&matches, "name")?;
    let service_id = shared::resolve_service(globals, &matches)?;
    let version = shared::resolve_editable_version(globals, &matches, &service_id).await?;

    kafka::delete(&globals.client, &service_id, version, &name).await?;
    text::success(
        globals.out,
        &format!(
            "Deleted Kafka logging endpoint {} (service {} version {})",
            name, service_id, version
        ),
    );
    Ok(())
}

/// Writes the full field block for one endpoint, one `Key: value` line per
/// field, in the order the platform documents them.
fn write_endpoint(out: &mut dyn Write, indent: &str, endpoint: &Kafka) {
    text::field(out, indent, "Service ID", &endpoint.service_id);
    text::field(out, indent, "Version", &endpoint.version);
    text::field(out, indent, "Name", &endpoint.name);
    text::field(out, indent, "Topic", &endpoint.topic);
    text::field(out, indent, "Brokers", &endpoint.brokers);
    text::field(out, indent, "Required acks", &endpoint.required_acks);
    text::field(out, indent, "Compression codec", &endpoint.compression_codec);
    text::field(out, indent, "Use TLS", &endpoint.use_tls);
    text::field(out, indent, "TLS CA certificate", &endpoint.tls_ca_cert);
    text::field(out, indent, "TLS client certificate", &endpoint.tls_client_cert);
    text::field(out, indent, "TLS client key", &endpoint.tls_client_key);
    text::field(out, indent, "TLS hostname", &endpoint.tls_hostname);
    text::field(out, indent, "Format", &endpoint.format);
    text::field(out, indent, "Format version", &endpoint.format_version);
    text::field(out, indent, "Response condition", &endpoint.response_condition);
    text::field(out, indent, "Placement", &endpoint.placement);
    text::field(out, indent, "Parse log key-values", &endpoint.parse_log_keyvals);
    text::field(out, indent, "Max batch size", &endpoint.request_max_bytes);
    text::field(out, indent, "SASL authentication method", &endpoint.auth_method);
    text::field(out, indent, "SASL authentication username", &endpoint.user);
    text::field(out, indent, "SASL authentication password", &endpoint.password);
}
