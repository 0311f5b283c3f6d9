use tracing::info;

use crate::client::{ClientConfig, InvocationClient};
use crate::core::request::FoldingRequest;
use crate::core::result::FoldResult;
use crate::core::types::FoldingModel;
use crate::error::Result;
use crate::folding::{boltz2, esmfold};

/// Runs validated folding requests against the configured providers
#[derive(Debug, Clone)]
pub struct FoldingService {
    client: InvocationClient,
}

impl FoldingService {
    #[must_use]
    pub fn new(client: InvocationClient) -> Self {
        Self { client }
    }

    /// Build the service and its invocation client from a configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Ok(Self::new(InvocationClient::new(config)?))
    }

    #[must_use]
    pub fn client(&self) -> &InvocationClient {
        &self.client
    }

    /// Submit a request, wait for the provider, and extract per-residue confidence
    ///
    /// # Errors
    ///
    /// Propagates every `FoldingError` raised by the invocation client, and
    /// `FoldingError::Provider` when the provider's body carries no structure.
    pub async fn fold(&self, request: &FoldingRequest) -> Result<FoldResult> {
        let config = self.client.config();

        let result = match request.model() {
            FoldingModel::EsmFold => {
                let body = self
                    .client
                    .invoke(
                        esmfold::PROVIDER_NAME,
                        &config.esmfold_url,
                        &esmfold::build_payload(request),
                    )
                    .await?;
                esmfold::unpack_response(&body)?
            }
            FoldingModel::Boltz2 => {
                let body = self
                    .client
                    .invoke(
                        boltz2::PROVIDER_NAME,
                        &config.boltz2_url,
                        &boltz2::build_payload(request),
                    )
                    .await?;
                boltz2::unpack_response(&body)?
            }
        };

        info!(
            "{} returned {} structure with {} scored residues",
            request.model(),
            result.format,
            result.plddt.len()
        );

        Ok(result)
    }
}
