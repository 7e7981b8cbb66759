//! Environment composition through the library API.

use std::collections::BTreeMap;

use nv::core::cloud::{CloudCredentials, CredentialProvider};
use nv::core::compose::{self, Composer, Layers, Request};
use nv::core::config::Settings;
use nv::core::keyring::Disabled;
use nv::core::lifecycle::{self, CreateOptions};
use nv::core::store;
use nv::error::Result;
use tempfile::TempDir;

struct FixedCredentials;

impl CredentialProvider for FixedCredentials {
    fn resolve(&self, profile: &str) -> Result<CloudCredentials> {
        assert_eq!(profile, "prod");
        Ok(CloudCredentials {
            region: Some("eu-west-1".into()),
            access_key_id: "AKIA".into(),
            secret_access_key: "from-aws".into(),
            session_token: None,
            expiry: None,
        })
    }
}

fn ambient() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("PATH".to_string(), "/usr/bin".to_string()),
        ("AWS_SESSION_TOKEN".to_string(), "inherited".to_string()),
    ])
}

#[test]
fn test_secrets_take_precedence_over_cloud_credentials() {
    let tmp = TempDir::new().unwrap();
    lifecycle::create(
        tmp.path(),
        CreateOptions {
            project_name: Some("shop".into()),
            aws_profile: Some("prod".into()),
            secrets: BTreeMap::from([(
                "AWS_SECRET_ACCESS_KEY".to_string(),
                "from-secrets".to_string(),
            )]),
            ..Default::default()
        },
        &Disabled,
        &Settings::default(),
    )
    .unwrap();

    let settings = Settings::default();
    let composer = Composer::new(ambient(), &Disabled, &FixedCredentials, &settings);
    let prepared = composer
        .prepare(&Request {
            project_dir: tmp.path(),
            environment: "",
            password: None,
            update_keyring: false,
        })
        .unwrap();

    let env = prepared.env;
    assert_eq!(env.get("AWS_SECRET_ACCESS_KEY"), Some("from-secrets"));
    assert_eq!(env.get("AWS_ACCESS_KEY_ID"), Some("AKIA"));
    assert_eq!(env.get("AWS_DEFAULT_REGION"), Some("eu-west-1"));
    assert_eq!(env.get("AWS_SESSION_TOKEN"), Some(""));
    assert_eq!(env.get("NV_PROJECT"), Some("shop"));
    assert_eq!(env.get("NV_ENVIRONMENT"), Some(""));
}

#[test]
fn test_compose_is_pure_over_ambient() {
    let tmp = TempDir::new().unwrap();
    lifecycle::create(tmp.path(), CreateOptions::default(), &Disabled, &Settings::default())
        .unwrap();
    let (environment, descriptor) = store::load(tmp.path(), "").unwrap();

    let ambient = ambient();
    let layers = Layers {
        environment: &environment,
        descriptor: &descriptor,
        toolchain: None,
        cloud: None,
        secrets: None,
    };
    let first = compose::compose(&ambient, layers).unwrap();
    let second = compose::compose(&ambient, layers).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.get("AWS_SESSION_TOKEN"), Some("inherited"));
    assert_eq!(ambient.len(), 2);
}
