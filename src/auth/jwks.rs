use serde::Deserialize;

/// Subset of a published JSON Web Key this service cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct Jwk {
    pub kty: String,
    #[serde(default)]
    pub kid: Option<String>,
    #[serde(default, rename = "use")]
    pub key_use: Option<String>,
    #[serde(default)]
    pub alg: Option<String>,
    #[serde(default)]
    pub n: Option<String>,
    #[serde(default)]
    pub e: Option<String>,
}

impl Jwk {
    /// RSA modulus and exponent, when both are present.
    pub fn rsa_components(&self) -> Option<(&str, &str)> {
        match (self.n.as_deref(), self.e.as_deref()) {
            (Some(n), Some(e)) => Some((n, e)),
            _ => None,
        }
    }
}

/// The identity provider's published key set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeySet {
    pub keys: Vec<Jwk>,
}

impl KeySet {
    /// Find the RSA signing key matching a token's key identifier.
    pub fn find(&self, kid: &str) -> Option<&Jwk> {
        self.keys
            .iter()
            .filter(|key| key.kty == "RSA")
            .find(|key| key.kid.as_deref() == Some(kid))
    }
}
