//! Legacy assets and maintenance logs on Repository
//!
//! Assets are soft-deleted; every read here excludes deleted rows.

use rust_decimal::Decimal;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{
        asset::{
            Asset, AssetQuery, CreateAsset, CreateMaintenanceLog, MaintenanceLog,
            MaintenanceLogDetails, MaintenanceLogQuery, UpdateAsset,
        },
        parse_optional_date,
    },
};

impl Repository {
    // ---- Assets ----

    /// List live assets newest first
    pub async fn assets_list(&self, query: &AssetQuery) -> AppResult<Vec<Asset>> {
        let mut conditions = vec!["deleted = FALSE".to_string()];
        let mut idx = 1;

        if query.search.is_some() {
            conditions.push(format!("(name ILIKE ${0} OR asset_code ILIKE ${0})", idx));
            idx += 1;
        }
        if query.category.is_some() {
            conditions.push(format!("category = ${}", idx));
        }

        let q = format!(
            "SELECT * FROM assets WHERE {} ORDER BY id DESC",
            conditions.join(" AND ")
        );

        let mut builder = sqlx::query_as::<_, Asset>(&q);
        if let Some(ref search) = query.search { builder = builder.bind(format!("%{}%", search)); }
        if let Some(ref category) = query.category { builder = builder.bind(category); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn assets_get_by_id(&self, id: i32) -> AppResult<Asset> {
        sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1 AND deleted = FALSE")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
    }

    pub async fn assets_create(&self, data: &CreateAsset) -> AppResult<Asset> {
        let purchase_date = parse_optional_date("purchase_date", data.purchase_date.as_deref())?;
        let warranty_expiry = parse_optional_date("warranty_expiry", data.warranty_expiry.as_deref())?;
        let last_maintenance_date =
            parse_optional_date("last_maintenance_date", data.last_maintenance_date.as_deref())?;

        let row = sqlx::query_as::<_, Asset>(
            r#"
            INSERT INTO assets (
                name, category, asset_code, purchase_date, warranty_expiry,
                maintenance_interval_days, status, notes, last_maintenance_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.category)
        .bind(&data.asset_code)
        .bind(purchase_date)
        .bind(warranty_expiry)
        .bind(data.maintenance_interval_days)
        .bind(data.status.as_deref().unwrap_or("Active"))
        .bind(&data.notes)
        .bind(last_maintenance_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn assets_update(&self, id: i32, data: &UpdateAsset) -> AppResult<Asset> {
        let purchase_date = parse_optional_date("purchase_date", data.purchase_date.as_deref())?;
        let warranty_expiry = parse_optional_date("warranty_expiry", data.warranty_expiry.as_deref())?;
        let last_maintenance_date =
            parse_optional_date("last_maintenance_date", data.last_maintenance_date.as_deref())?;

        let mut sets = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.category, "category");
        add_field!(data.asset_code, "asset_code");
        add_field!(purchase_date, "purchase_date");
        add_field!(warranty_expiry, "warranty_expiry");
        add_field!(data.maintenance_interval_days, "maintenance_interval_days");
        add_field!(data.status, "status");
        add_field!(data.notes, "notes");
        add_field!(last_maintenance_date, "last_maintenance_date");

        if sets.is_empty() {
            return self.assets_get_by_id(id).await;
        }

        let query = format!(
            "UPDATE assets SET {} WHERE id = ${} AND deleted = FALSE RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Asset>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.category);
        bind_field!(data.asset_code);
        bind_field!(purchase_date);
        bind_field!(warranty_expiry);
        bind_field!(data.maintenance_interval_days);
        bind_field!(data.status);
        bind_field!(data.notes);
        bind_field!(last_maintenance_date);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
    }

    /// Flag an asset as deleted
    pub async fn assets_soft_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("UPDATE assets SET deleted = TRUE WHERE id = $1 AND deleted = FALSE")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Asset {} not found", id)));
        }
        Ok(())
    }

    // ---- Maintenance logs ----

    /// Append a log; a dated log also becomes the asset's last maintenance date
    pub async fn logs_create(&self, data: &CreateMaintenanceLog) -> AppResult<MaintenanceLog> {
        let maintenance_date = parse_optional_date("maintenance_date", data.maintenance_date.as_deref())?;

        let mut tx = self.pool.begin().await?;

        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM assets WHERE id = $1 AND deleted = FALSE)"
        )
        .bind(data.asset_id)
        .fetch_one(&mut *tx)
        .await?;
        if !exists {
            return Err(AppError::NotFound(format!("Asset {} not found", data.asset_id)));
        }

        let log = sqlx::query_as::<_, MaintenanceLog>(
            r#"
            INSERT INTO maintenance_logs (
                asset_id, maintenance_date, maintenance_type, description, cost, performed_by, remarks
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(data.asset_id)
        .bind(maintenance_date)
        .bind(&data.maintenance_type)
        .bind(&data.description)
        .bind(data.cost.unwrap_or(Decimal::ZERO))
        .bind(&data.performed_by)
        .bind(&data.remarks)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(date) = maintenance_date {
            sqlx::query("UPDATE assets SET last_maintenance_date = $1 WHERE id = $2")
                .bind(date)
                .bind(data.asset_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(log)
    }

    /// List logs newest service date first
    pub async fn logs_list(&self, query: &MaintenanceLogQuery) -> AppResult<Vec<MaintenanceLogDetails>> {
        let from = parse_optional_date("from", query.from.as_deref())?;
        let to = parse_optional_date("to", query.to.as_deref())?;
        let range = from.zip(to);

        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.asset_id.is_some() {
            conditions.push(format!("ml.asset_id = ${}", idx));
            idx += 1;
        }
        if range.is_some() {
            conditions.push(format!("ml.maintenance_date BETWEEN ${} AND ${}", idx, idx + 1));
            idx += 2;
        }
        if query.maintenance_type.is_some() {
            conditions.push(format!("ml.maintenance_type = ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let q = format!(
            r#"
            SELECT ml.*, a.name AS asset_name
            FROM maintenance_logs ml
            LEFT JOIN assets a ON a.id = ml.asset_id
            {}
            ORDER BY ml.maintenance_date DESC NULLS LAST, ml.id DESC
            "#,
            where_clause
        );

        let mut builder = sqlx::query_as::<_, MaintenanceLogDetails>(&q);
        if let Some(asset_id) = query.asset_id { builder = builder.bind(asset_id); }
        if let Some((start, end)) = range { builder = builder.bind(start).bind(end); }
        if let Some(ref kind) = query.maintenance_type { builder = builder.bind(kind); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Most recent logs for the legacy dashboard
    pub async fn logs_recent(&self, limit: i64) -> AppResult<Vec<MaintenanceLogDetails>> {
        let rows = sqlx::query_as::<_, MaintenanceLogDetails>(
            r#"
            SELECT ml.*, a.name AS asset_name
            FROM maintenance_logs ml
            LEFT JOIN assets a ON a.id = ml.asset_id
            ORDER BY ml.maintenance_date DESC NULLS LAST, ml.id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn logs_count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM maintenance_logs")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
