use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::{json, Value};
use word_rank_lambda::adapters::object_store::ObjectStore;
use word_rank_lambda::handlers::top_words::{handle_event, HandlerConfig};
use word_rank_lambda::logging::log_info;
use word_rank_lambda::runtime::contract::InvocationResponse;
use word_rank_lambda::runtime::storage::{ObjectLocation, RESULT_CONTENT_TYPE};

struct S3ObjectStore {
    s3_client: aws_sdk_s3::Client,
}

impl ObjectStore for S3ObjectStore {
    fn put_object(&self, location: &ObjectLocation, body: &[u8]) -> Result<(), String> {
        let bucket = location.bucket.clone();
        let object_key = location.key.clone();
        let body_bytes = body.to_vec();
        let client = self.s3_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_object()
                    .bucket(bucket)
                    .key(object_key)
                    .content_type(RESULT_CONTENT_TYPE)
                    .body(ByteStream::from(body_bytes))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to write object to s3: {error}"))
            })
        })
    }

    fn presign_get_url(
        &self,
        location: &ObjectLocation,
        expires_in: Duration,
    ) -> Result<String, String> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|error| format!("invalid presigning expiry: {error}"))?;
        let bucket = location.bucket.clone();
        let object_key = location.key.clone();
        let client = self.s3_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .get_object()
                    .bucket(bucket)
                    .key(object_key)
                    .presigned(presigning)
                    .await
                    .map(|request| request.uri().to_string())
                    .map_err(|error| format!("failed to presign object url: {error}"))
            })
        })
    }
}

async fn handle_request(
    event: LambdaEvent<Value>,
    config: &HandlerConfig,
    store: &S3ObjectStore,
) -> Result<InvocationResponse, Error> {
    Ok(handle_event(&event.payload, config, store))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = HandlerConfig::from_env().map_err(Error::from)?;
    log_info(
        "top_words_runtime",
        "config_loaded",
        json!({
            "location": config.location.to_string(),
            "top_n": config.top_n,
            "url_expiry_secs": config.url_expiry.as_secs(),
        }),
    );

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = S3ObjectStore {
        s3_client: aws_sdk_s3::Client::new(&aws_config),
    };

    let config = &config;
    let store = &store;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(event, config, store).await
    }))
    .await
}
