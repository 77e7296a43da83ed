use rcgen::{CertificateParams, SanType};
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use tunnelhub::storage;

pub fn certs_dir() -> PathBuf {
    storage::base_dir().join("certs")
}

pub fn cert_path() -> PathBuf {
    certs_dir().join("tunnelhub.crt.pem")
}

pub fn key_path() -> PathBuf {
    certs_dir().join("tunnelhub.key.pem")
}

/// Generates a self-signed certificate on first start; later starts reuse it.
pub async fn ensure_tls_cert(cert_path: &Path, key_path: &Path) -> Result<(), String> {
    if tokio::fs::metadata(cert_path).await.is_ok() && tokio::fs::metadata(key_path).await.is_ok() {
        return Ok(());
    }

    if let Some(parent) = cert_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|err| format!("failed to create cert dir: {err}"))?;
    }

    let mut params = CertificateParams::new(vec!["localhost".to_string()]);
    params
        .subject_alt_names
        .push(SanType::IpAddress(IpAddr::V4(Ipv4Addr::LOCALHOST)));
    let cert = rcgen::Certificate::from_params(params)
        .map_err(|err| format!("failed to create cert: {err}"))?;

    let cert_pem = cert
        .serialize_pem()
        .map_err(|err| format!("failed to serialize cert: {err}"))?;
    let key_pem = cert.serialize_private_key_pem();

    tokio::fs::write(cert_path, cert_pem)
        .await
        .map_err(|err| format!("failed to write cert: {err}"))?;
    tokio::fs::write(key_path, key_pem)
        .await
        .map_err(|err| format!("failed to write key: {err}"))?;
    Ok(())
}
