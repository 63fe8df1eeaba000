//! DiscountDirectory

use shared::models::{Discount, DiscountCreate, DiscountKind, DiscountPatch, DiscountValue};
use shared::util::{add_months_millis, now_millis, snowflake_id};
use tracing::info;

use crate::db::StoreHandle;
use crate::db::repository::{DiscountRepository, Updated};
use crate::utils::validation::{
    MAX_CODE_LEN, MAX_NAME_LEN, require, validate_amount, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Months added to "now" by a renewal
const RENEW_MONTHS: u32 = 1;

/// Canonical stored form of a redemption code
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

fn discount_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::DiscountNotFound, format!("Discount {} not found", id))
        .with_detail("discountId", id)
}

/// `active` as derived at write time
fn derive_active(expires_at: Option<i64>, now: i64) -> bool {
    expires_at.is_none_or(|expiry| expiry > now)
}

fn parse_kind(discount_type: Option<&str>, code: Option<&str>) -> AppResult<DiscountKind> {
    let discount_type = require(discount_type, "type")?;
    match discount_type.trim().to_ascii_lowercase().as_str() {
        "static" => Ok(DiscountKind::Static),
        "code" => {
            let code = code.map(normalize_code).unwrap_or_default();
            if code.is_empty() {
                return Err(AppError::validation("code is required for type 'code'")
                    .with_detail("field", "code"));
            }
            validate_required_text(&code, "code", MAX_CODE_LEN)?;
            Ok(DiscountKind::Code { code })
        }
        other => Err(AppError::validation(format!(
            "Unknown discount type '{}', expected 'static' or 'code'",
            other
        ))
        .with_detail("field", "type")),
    }
}

fn parse_value(percent: Option<f64>, amount: Option<f64>) -> AppResult<DiscountValue> {
    match (percent, amount) {
        (Some(percent), None) => {
            if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
                return Err(AppError::validation(format!(
                    "percent must be within [0, 100], got {}",
                    percent
                ))
                .with_detail("field", "percent"));
            }
            Ok(DiscountValue::Percent(percent))
        }
        (None, Some(amount)) => {
            validate_amount(amount, "amount")?;
            Ok(DiscountValue::Amount(amount))
        }
        (Some(_), Some(_)) => Err(AppError::validation(
            "Give either percent or amount, not both",
        )),
        (None, None) => Err(AppError::validation("percent or amount is required")
            .with_detail("field", "percent")),
    }
}

/// Discount directory
#[derive(Clone)]
pub struct DiscountDirectory {
    repo: DiscountRepository,
}

impl DiscountDirectory {
    pub fn new(store: StoreHandle) -> Self {
        Self {
            repo: DiscountRepository::new(store),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Discount>> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn get(&self, id: i64) -> AppResult<Discount> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| discount_not_found(id))
    }

    /// Create a discount
    ///
    /// `active` is derived from the expiry: a discount created already expired
    /// stays inactive until renewed.
    pub async fn create(&self, payload: DiscountCreate) -> AppResult<Discount> {
        let name = require(payload.name, "name")?;
        validate_required_text(&name, "name", MAX_NAME_LEN)?;
        let kind = parse_kind(payload.discount_type.as_deref(), payload.code.as_deref())?;
        let value = parse_value(payload.percent, payload.amount)?;
        self.ensure_code_free(&kind, None).await?;

        let discount = Discount {
            id: snowflake_id(),
            name: name.trim().to_string(),
            value,
            kind,
            expires_at: payload.expires_at,
            active: derive_active(payload.expires_at, now_millis()),
        };
        self.repo.create(&discount).await?;

        info!(
            discount_id = discount.id,
            kind = discount.kind.type_name(),
            active = discount.active,
            "Discount created"
        );
        Ok(discount)
    }

    /// Full replacement of every mutable field
    ///
    /// `active` is taken from the payload and left unchanged when omitted.
    pub async fn replace(&self, id: i64, payload: DiscountCreate) -> AppResult<Discount> {
        let name = require(payload.name, "name")?;
        validate_required_text(&name, "name", MAX_NAME_LEN)?;
        let kind = parse_kind(payload.discount_type.as_deref(), payload.code.as_deref())?;
        let value = parse_value(payload.percent, payload.amount)?;

        let current = self.get(id).await?;
        self.ensure_code_free(&kind, Some(id)).await?;

        let discount = Discount {
            id,
            name: name.trim().to_string(),
            value,
            kind,
            expires_at: payload.expires_at,
            active: payload.active.unwrap_or(current.active),
        };
        let saved = self.save(discount).await?;
        info!(discount_id = id, "Discount replaced");
        Ok(saved)
    }

    /// Partial edit of name, value, expiry and active flag
    pub async fn patch(&self, id: i64, payload: DiscountPatch) -> AppResult<Discount> {
        if payload.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }
        let mut discount = self.get(id).await?;

        if let Some(name) = payload.name {
            validate_required_text(&name, "name", MAX_NAME_LEN)?;
            discount.name = name.trim().to_string();
        }
        if payload.percent.is_some() || payload.amount.is_some() {
            discount.value = parse_value(payload.percent, payload.amount)?;
        }
        if let Some(expires_at) = payload.expires_at {
            discount.expires_at = expires_at;
        }
        if let Some(active) = payload.active {
            discount.active = active;
        }

        let saved = self.save(discount).await?;
        info!(discount_id = id, "Discount updated");
        Ok(saved)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(discount_not_found(id));
        }
        info!(discount_id = id, "Discount deleted");
        Ok(())
    }

    /// Renew: expiry moves one calendar month past now and `active` is forced on
    ///
    /// The only path from expired back to active.
    pub async fn renew(&self, id: i64) -> AppResult<Discount> {
        let mut discount = self.get(id).await?;
        let now = now_millis();
        let expires_at = add_months_millis(now, RENEW_MONTHS)
            .ok_or_else(|| AppError::internal("Renewal expiry out of range"))?;

        discount.expires_at = Some(expires_at);
        discount.active = true;

        let saved = self.save(discount).await?;
        info!(discount_id = id, expires_at, "Discount renewed");
        Ok(saved)
    }

    /// Resolve a presented redemption code to its code-type discount
    ///
    /// Unknown codes fail with `DiscountInvalid`. Whether the discount is still
    /// active is left to the pricing engine.
    pub async fn resolve_code(&self, code: &str) -> AppResult<Discount> {
        let code = normalize_code(code);
        if code.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::DiscountInvalid,
                "Discount code must not be empty",
            ));
        }
        self.repo
            .find_by_code(&code)
            .await?
            .into_iter()
            .find(|d| matches!(d.kind, DiscountKind::Code { .. }))
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::DiscountInvalid,
                    format!("Unknown discount code '{}'", code),
                )
            })
    }

    async fn ensure_code_free(&self, kind: &DiscountKind, except: Option<i64>) -> AppResult<()> {
        let Some(code) = kind.code() else {
            return Ok(());
        };
        let taken = self
            .repo
            .find_by_code(code)
            .await?
            .into_iter()
            .any(|d| Some(d.id) != except && d.kind.code().is_some());
        if taken {
            return Err(AppError::conflict(format!(
                "Discount code '{}' is already in use",
                code
            ))
            .with_detail("field", "code"));
        }
        Ok(())
    }

    async fn save(&self, discount: Discount) -> AppResult<Discount> {
        let id = discount.id;
        match self.repo.replace(&discount).await? {
            Updated::Applied(saved) | Updated::Rejected(saved) => Ok(saved),
            Updated::Missing => Err(discount_not_found(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use serde_json::json;
    use std::sync::Arc;

    fn create_test_directory() -> DiscountDirectory {
        DiscountDirectory::new(Arc::new(MemoryStore::new()))
    }

    fn percent_code(code: &str, percent: f64) -> DiscountCreate {
        DiscountCreate {
            name: Some("Happy hour".into()),
            percent: Some(percent),
            discount_type: Some("code".into()),
            code: Some(code.into()),
            ..Default::default()
        }
    }

    fn static_amount(amount: f64) -> DiscountCreate {
        DiscountCreate {
            name: Some("Staff".into()),
            amount: Some(amount),
            discount_type: Some("Static".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_code_discount() {
        let dir = create_test_directory();
        let d = dir.create(percent_code(" happy15 ", 15.0)).await.unwrap();
        assert!(d.active);
        assert_eq!(d.kind.code(), Some("HAPPY15"));
        assert_eq!(d.value, DiscountValue::Percent(15.0));
        assert_eq!(dir.get(d.id).await.unwrap(), d);
    }

    #[tokio::test]
    async fn test_code_type_requires_code() {
        let dir = create_test_directory();
        for code in [None, Some("".to_string()), Some("   ".to_string())] {
            let mut payload = percent_code("X", 10.0);
            payload.code = code;
            let err = dir.create(payload).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationFailed);
        }
        assert!(dir.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_type_rejected() {
        let dir = create_test_directory();
        let mut payload = static_amount(2.0);
        payload.discount_type = Some("voucher".into());
        let err = dir.create(payload).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let mut payload = static_amount(2.0);
        payload.discount_type = None;
        assert!(dir.create(payload).await.is_err());
    }

    #[tokio::test]
    async fn test_static_ignores_code() {
        let dir = create_test_directory();
        let mut payload = static_amount(2.0);
        payload.code = Some("IGNORED".into());
        let d = dir.create(payload).await.unwrap();
        assert_eq!(d.kind, DiscountKind::Static);
    }

    #[tokio::test]
    async fn test_value_validation() {
        let dir = create_test_directory();
        assert!(dir.create(percent_code("A", 101.0)).await.is_err());
        assert!(dir.create(percent_code("B", -1.0)).await.is_err());
        assert!(dir.create(static_amount(-2.0)).await.is_err());

        let mut both = static_amount(2.0);
        both.percent = Some(10.0);
        assert!(dir.create(both).await.is_err());

        let mut neither = static_amount(2.0);
        neither.amount = None;
        assert!(dir.create(neither).await.is_err());
    }

    #[tokio::test]
    async fn test_expired_at_creation_then_renew() {
        let dir = create_test_directory();
        let mut payload = static_amount(2.0);
        payload.expires_at = Some(now_millis() - 60_000);
        let d = dir.create(payload).await.unwrap();
        assert!(!d.active);

        let before = now_millis();
        let renewed = dir.renew(d.id).await.unwrap();
        assert!(renewed.active);
        assert!(renewed.expires_at.unwrap() > before);
        assert!(dir.get(d.id).await.unwrap().active);
    }

    #[tokio::test]
    async fn test_duplicate_code_conflicts() {
        let dir = create_test_directory();
        let first = dir.create(percent_code("SPRING", 10.0)).await.unwrap();
        let err = dir.create(percent_code("spring", 20.0)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AlreadyExists);

        // Replacing a discount with its own code is fine
        let again = dir.replace(first.id, percent_code("SPRING", 12.0)).await.unwrap();
        assert_eq!(again.value, DiscountValue::Percent(12.0));
    }

    #[tokio::test]
    async fn test_replace_switches_kind_and_keeps_active() {
        let dir = create_test_directory();
        let mut payload = percent_code("GONE", 10.0);
        payload.expires_at = Some(now_millis() - 1);
        let d = dir.create(payload).await.unwrap();
        assert!(!d.active);

        let mut replacement = static_amount(3.0);
        replacement.expires_at = Some(now_millis() + 86_400_000);
        let replaced = dir.replace(d.id, replacement).await.unwrap();
        assert_eq!(replaced.kind, DiscountKind::Static);
        assert_eq!(replaced.value, DiscountValue::Amount(3.0));
        // Not auto-corrected
        assert!(!replaced.active);

        let stored = serde_json::to_value(dir.get(d.id).await.unwrap()).unwrap();
        assert!(stored.get("code").is_none());
        assert!(stored.get("percent").is_none());
    }

    #[tokio::test]
    async fn test_patch() {
        let dir = create_test_directory();
        let d = dir.create(static_amount(2.0)).await.unwrap();

        let patched = dir
            .patch(
                d.id,
                DiscountPatch {
                    percent: Some(5.0),
                    active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(patched.value, DiscountValue::Percent(5.0));
        assert!(!patched.active);
        assert_eq!(patched.name, "Staff");

        let err = dir.patch(d.id, DiscountPatch::default()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn test_patch_null_expiry_clears_it() {
        let dir = create_test_directory();
        let mut payload = static_amount(1.0);
        payload.expires_at = Some(now_millis() + 60_000);
        let d = dir.create(payload).await.unwrap();
        assert!(d.expires_at.is_some());

        let patch: DiscountPatch = serde_json::from_value(json!({"expiresAt": null})).unwrap();
        assert!(!patch.is_empty());
        let cleared = dir.patch(d.id, patch).await.unwrap();
        assert_eq!(cleared.expires_at, None);
        assert_eq!(dir.get(d.id).await.unwrap().expires_at, None);
    }

    #[tokio::test]
    async fn test_resolve_code_and_delete() {
        let dir = create_test_directory();
        let d = dir.create(percent_code("HAPPY15", 15.0)).await.unwrap();
        dir.create(static_amount(1.0)).await.unwrap();

        assert_eq!(dir.resolve_code(" happy15").await.unwrap().id, d.id);
        let err = dir.resolve_code("NOPE").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DiscountInvalid);

        dir.delete(d.id).await.unwrap();
        assert_eq!(
            dir.get(d.id).await.unwrap_err().code,
            ErrorCode::DiscountNotFound
        );
        assert_eq!(
            dir.delete(d.id).await.unwrap_err().code,
            ErrorCode::DiscountNotFound
        );
    }
}
