//! Equipment domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{
        enums::EquipmentStatus,
        equipment::{CreateEquipment, Equipment, EquipmentQuery, EquipmentSummary, UpdateEquipment},
        parse_optional_date,
    },
};

impl Repository {
    /// List equipment with team, technician and open request count, ordered by name
    pub async fn equipment_list(&self, query: &EquipmentQuery) -> AppResult<Vec<EquipmentSummary>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.status.is_some() {
            conditions.push(format!("e.status = ${}", idx));
            idx += 1;
        }
        if query.category.is_some() {
            conditions.push(format!("e.category = ${}", idx));
            idx += 1;
        }
        if query.department.is_some() {
            conditions.push(format!("e.department = ${}", idx));
            idx += 1;
        }
        if query.search.is_some() {
            conditions.push(format!("(e.name ILIKE ${0} OR e.serial_number ILIKE ${0})", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let q = format!(
            r#"
            SELECT e.*,
                   t.name AS team_name,
                   tm.name AS technician_name,
                   COUNT(mr.id) AS open_requests
            FROM equipment e
            LEFT JOIN teams t ON e.maintenance_team_id = t.id
            LEFT JOIN team_members tm ON e.default_technician_id = tm.id
            LEFT JOIN maintenance_requests mr
                   ON e.id = mr.equipment_id AND mr.stage NOT IN ('Repaired', 'Scrap')
            {}
            GROUP BY e.id, t.name, tm.name
            ORDER BY e.name
            "#,
            where_clause
        );

        let mut builder = sqlx::query_as::<_, EquipmentSummary>(&q);
        if let Some(status) = query.status {
            builder = builder.bind(status);
        }
        if let Some(ref category) = query.category {
            builder = builder.bind(category);
        }
        if let Some(ref department) = query.department {
            builder = builder.bind(department);
        }
        if let Some(ref search) = query.search {
            builder = builder.bind(format!("%{}%", search));
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn equipment_get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Register equipment
    pub async fn equipment_create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let purchase_date = parse_optional_date("purchase_date", data.purchase_date.as_deref())?;
        let warranty_expiry = parse_optional_date("warranty_expiry", data.warranty_expiry.as_deref())?;

        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (
                name, serial_number, category, department, assigned_employee,
                purchase_date, warranty_expiry, physical_location,
                maintenance_team_id, default_technician_id, status, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.serial_number)
        .bind(&data.category)
        .bind(&data.department)
        .bind(&data.assigned_employee)
        .bind(purchase_date)
        .bind(warranty_expiry)
        .bind(&data.physical_location)
        .bind(data.maintenance_team_id)
        .bind(data.default_technician_id)
        .bind(data.status.unwrap_or_default())
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update only the supplied fields
    pub async fn equipment_update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        let purchase_date = parse_optional_date("purchase_date", data.purchase_date.as_deref())?;
        let warranty_expiry = parse_optional_date("warranty_expiry", data.warranty_expiry.as_deref())?;

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
        add_field!(data.serial_number, "serial_number");
        add_field!(data.category, "category");
        add_field!(data.department, "department");
        add_field!(data.assigned_employee, "assigned_employee");
        add_field!(purchase_date, "purchase_date");
        add_field!(warranty_expiry, "warranty_expiry");
        add_field!(data.physical_location, "physical_location");
        add_field!(data.maintenance_team_id, "maintenance_team_id");
        add_field!(data.default_technician_id, "default_technician_id");
        add_field!(data.status, "status");
        add_field!(data.notes, "notes");

        if sets.is_empty() {
            return self.equipment_get_by_id(id).await;
        }

        let query = format!(
            "UPDATE equipment SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.serial_number);
        bind_field!(data.category);
        bind_field!(data.department);
        bind_field!(data.assigned_employee);
        bind_field!(purchase_date);
        bind_field!(warranty_expiry);
        bind_field!(data.physical_location);
        bind_field!(data.maintenance_team_id);
        bind_field!(data.default_technician_id);
        bind_field!(data.status);
        bind_field!(data.notes);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Set the equipment status directly
    pub async fn equipment_set_status(&self, id: i32, status: EquipmentStatus) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("UPDATE equipment SET status = $1 WHERE id = $2 RETURNING *")
            .bind(status)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }
}
