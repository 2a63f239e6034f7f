use aws_sdk_s3::primitives::ByteStream;
use chrono::Utc;
use fake_traffic_core::contract::InvocationResponse;
use fake_traffic_lambda::adapters::object_store::SessionLogStore;
use fake_traffic_lambda::adapters::traffic_client::ReqwestTrafficClient;
use fake_traffic_lambda::handlers::session::handle_session;
use fake_traffic_lambda::logging::init_logging;
use fake_traffic_lambda::startup::cold_start;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use tracing::info;

struct S3SessionLogStore {
    bucket: String,
    s3_client: aws_sdk_s3::Client,
}

impl SessionLogStore for S3SessionLogStore {
    fn put_object(&self, key: &str, body: &[u8], content_type: &str) -> Result<(), String> {
        let bucket = self.bucket.clone();
        let object_key = key.to_string();
        let body_bytes = body.to_vec();
        let content_type = content_type.to_string();
        let client = self.s3_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_object()
                    .bucket(bucket)
                    .key(object_key)
                    .content_type(content_type)
                    .body(ByteStream::from(body_bytes))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to write object to s3: {error}"))
            })
        })
    }

    fn location(&self, key: &str) -> String {
        format!("s3://{}/{key}", self.bucket)
    }
}

struct RuntimeDependencies {
    traffic_client: ReqwestTrafficClient,
    log_store: S3SessionLogStore,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<InvocationResponse, Error> {
    info!(request_id = %event.context.request_id, "invocation received");

    let mut rng = StdRng::from_entropy();
    let response = handle_session(
        Utc::now(),
        &mut rng,
        &deps.traffic_client,
        &deps.log_store,
    )?;
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging();

    // Fails the cold start before the runtime polls for any event.
    let started = cold_start(|name| std::env::var(name).ok(), ReqwestTrafficClient::new)?;
    let config = started.config;
    info!(
        bucket = %config.log_bucket,
        proxied = config.tor_proxy.is_some(),
        "fake traffic lambda initialised"
    );

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = RuntimeDependencies {
        traffic_client: started.traffic_client,
        log_store: S3SessionLogStore {
            bucket: config.log_bucket,
            s3_client: aws_sdk_s3::Client::new(&aws_config),
        },
    };
    let deps = &deps;

    lambda_runtime::run(service_fn(move |event| handle_request(event, deps))).await
}
