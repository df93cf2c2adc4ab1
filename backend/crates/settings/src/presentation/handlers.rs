//! HTTP Handlers

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use std::sync::Arc;

use crate::application::{
    PayoutDetailsUseCase, PriceUseCase, QrImageUseCase, SettingsConfig,
};
use crate::domain::entities::{BankDetails, CryptoDetails};
use crate::domain::repository::{
    DetailsRepository, FileStore, PriceRepository, QrImageRepository,
};
use crate::domain::value_objects::{Price, QrUpload};
use crate::error::{SettingsError, SettingsResult};
use crate::presentation::dto::{
    BankDetailsRequest, BankDetailsResponse, CryptoDetailsRequest, CryptoDetailsResponse,
    PriceRequest, PriceResponse, QrImageMetadata, QrImageResponse,
};

/// Multipart field carrying the QR image
pub const QR_IMAGE_FIELD: &str = "qrImage";

/// Everything the settings handlers need from storage
pub trait SettingsStore:
    DetailsRepository + PriceRepository + QrImageRepository + Clone + Send + Sync + 'static
{
}

impl<T> SettingsStore for T where
    T: DetailsRepository + PriceRepository + QrImageRepository + Clone + Send + Sync + 'static
{
}

/// Shared state for settings handlers
#[derive(Clone)]
pub struct SettingsAppState<R, F>
where
    R: SettingsStore,
    F: FileStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub files: Arc<F>,
    pub config: Arc<SettingsConfig>,
}

// ============================================================================
// Bank / Crypto Details
// ============================================================================

/// GET /api/bank-details
pub async fn get_bank_details<R, F>(
    State(state): State<SettingsAppState<R, F>>,
) -> SettingsResult<Json<BankDetailsResponse>>
where
    R: SettingsStore,
    F: FileStore + Clone + Send + Sync + 'static,
{
    let use_case = PayoutDetailsUseCase::new(state.repo.clone(), state.config.clone());
    Ok(Json(use_case.get_bank().await?.into()))
}

/// PATCH /api/bank-details
pub async fn update_bank_details<R, F>(
    State(state): State<SettingsAppState<R, F>>,
    payload: Result<Json<BankDetailsRequest>, JsonRejection>,
) -> SettingsResult<Json<BankDetailsResponse>>
where
    R: SettingsStore,
    F: FileStore + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(invalid_body)?;
    let details = BankDetails::new(
        req.bank_name.as_deref(),
        req.account_name.as_deref(),
        req.account_no.as_deref(),
        req.ifsc_code.as_deref(),
    )?;

    let use_case = PayoutDetailsUseCase::new(state.repo.clone(), state.config.clone());
    Ok(Json(use_case.update_bank(details).await?.into()))
}

/// GET /api/crypto-details
pub async fn get_crypto_details<R, F>(
    State(state): State<SettingsAppState<R, F>>,
) -> SettingsResult<Json<CryptoDetailsResponse>>
where
    R: SettingsStore,
    F: FileStore + Clone + Send + Sync + 'static,
{
    let use_case = PayoutDetailsUseCase::new(state.repo.clone(), state.config.clone());
    Ok(Json(use_case.get_crypto().await?.into()))
}

/// PATCH /api/crypto-details
pub async fn update_crypto_details<R, F>(
    State(state): State<SettingsAppState<R, F>>,
    payload: Result<Json<CryptoDetailsRequest>, JsonRejection>,
) -> SettingsResult<Json<CryptoDetailsResponse>>
where
    R: SettingsStore,
    F: FileStore + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(invalid_body)?;
    let details = CryptoDetails::new(req.wallet_address.as_deref(), req.currency_name.as_deref())?;

    let use_case = PayoutDetailsUseCase::new(state.repo.clone(), state.config.clone());
    Ok(Json(use_case.update_crypto(details).await?.into()))
}

// ============================================================================
// Price
// ============================================================================

/// GET /api/price
pub async fn get_price<R, F>(
    State(state): State<SettingsAppState<R, F>>,
) -> SettingsResult<Json<PriceResponse>>
where
    R: SettingsStore,
    F: FileStore + Clone + Send + Sync + 'static,
{
    let use_case = PriceUseCase::new(state.repo.clone(), state.config.clone());
    let price = use_case.current().await?;

    Ok(Json(PriceResponse {
        price,
        created_at: None,
    }))
}

/// PATCH /api/price
pub async fn update_price<R, F>(
    State(state): State<SettingsAppState<R, F>>,
    payload: Result<Json<PriceRequest>, JsonRejection>,
) -> SettingsResult<Json<PriceResponse>>
where
    R: SettingsStore,
    F: FileStore + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(invalid_body)?;
    let price = req
        .price
        .as_ref()
        .ok_or_else(|| SettingsError::InvalidArgument("price is required".to_string()))
        .and_then(Price::from_json)?;

    let use_case = PriceUseCase::new(state.repo.clone(), state.config.clone());
    let quote = use_case.record(price).await?;

    Ok(Json(PriceResponse {
        price: quote.price,
        created_at: Some(quote.created_at),
    }))
}

// ============================================================================
// QR Image
// ============================================================================

/// GET /api/qr-image
pub async fn get_qr_image<R, F>(
    State(state): State<SettingsAppState<R, F>>,
) -> SettingsResult<Json<QrImageResponse>>
where
    R: SettingsStore,
    F: FileStore + Clone + Send + Sync + 'static,
{
    let use_case = QrImageUseCase::new(state.repo.clone(), state.files.clone(), state.config.clone());
    let status = use_case.get().await?;

    Ok(Json(QrImageResponse {
        exists: status.exists(),
        image: status.image.map(QrImageMetadata::from),
    }))
}

/// PATCH /api/qr-image (multipart, field `qrImage`)
pub async fn update_qr_image<R, F>(
    State(state): State<SettingsAppState<R, F>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> SettingsResult<Json<QrImageMetadata>>
where
    R: SettingsStore,
    F: FileStore + Clone + Send + Sync + 'static,
{
    let mut multipart =
        multipart.map_err(|rejection| SettingsError::InvalidArgument(rejection.body_text()))?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(invalid_multipart)? {
        if field.name() != Some(QR_IMAGE_FIELD) {
            continue;
        }

        let original_name = field.file_name().map(str::to_string);
        let mime_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(invalid_multipart)?;

        upload = Some(QrUpload::new(
            bytes.to_vec(),
            original_name,
            mime_type,
            state.config.max_upload_bytes,
        )?);
        break;
    }

    let upload = upload.ok_or_else(|| {
        SettingsError::InvalidArgument(format!("{QR_IMAGE_FIELD} file is required"))
    })?;

    let use_case = QrImageUseCase::new(state.repo.clone(), state.files.clone(), state.config.clone());
    let image = use_case.replace(upload).await?;

    Ok(Json(image.into()))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn invalid_body(rejection: JsonRejection) -> SettingsError {
    SettingsError::InvalidArgument(rejection.body_text())
}

fn invalid_multipart(err: MultipartError) -> SettingsError {
    SettingsError::InvalidArgument(err.body_text())
}
