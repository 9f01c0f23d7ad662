//! Repository for the `competitive_reports` table.

use postertrack_core::pagination::PageRequest;
use postertrack_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use super::{AdvertiserRepo, BrandRepo};
use crate::models::competitive_report::{
    CompetitiveReport, CompetitiveReportDetail, CreateCompetitiveReport,
};

const COLUMNS: &str = "id, field_auditor_id, advertiser_id, brand_id, board_type_id, \
    category_id, region_id, state_id, city_id, images, created_at, updated_at";

const DETAIL_SELECT: &str = "SELECT r.id, r.field_auditor_id, r.advertiser_id, r.brand_id, \
        r.board_type_id, r.category_id, r.region_id, r.state_id, r.city_id, r.images, \
        r.created_at, r.updated_at, \
        a.name AS advertiser, b.name AS brand, bt.name AS board_type, c.name AS category, \
        rg.name AS region, s.name AS state, ci.name AS city \
     FROM competitive_reports r \
     JOIN advertisers a ON a.id = r.advertiser_id \
     JOIN brands b ON b.id = r.brand_id \
     JOIN board_types bt ON bt.id = r.board_type_id \
     JOIN categories c ON c.id = r.category_id \
     JOIN regions rg ON rg.id = r.region_id \
     JOIN states s ON s.id = r.state_id \
     JOIN cities ci ON ci.id = r.city_id";

pub struct CompetitiveReportRepo;

impl CompetitiveReportRepo {
    /// Record a sighting together with any advertiser, brand and category
    /// links it introduces, in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCompetitiveReport,
    ) -> Result<CompetitiveReport, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let advertiser = AdvertiserRepo::find_or_create_with_categories(
            &mut tx,
            &input.advertiser,
            &input.category_ids,
        )
        .await?;
        let brand =
            BrandRepo::find_or_create(&mut tx, &input.brand, advertiser.id, input.category_id)
                .await?;

        let query = format!(
            "INSERT INTO competitive_reports
                (field_auditor_id, advertiser_id, brand_id, board_type_id, category_id,
                 region_id, state_id, city_id, images)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let report = sqlx::query_as::<_, CompetitiveReport>(&query)
            .bind(input.field_auditor_id)
            .bind(advertiser.id)
            .bind(brand.id)
            .bind(input.board_type_id)
            .bind(input.category_id)
            .bind(input.region_id)
            .bind(input.state_id)
            .bind(input.city_id)
            .bind(Json(&input.images))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(report)
    }

    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CompetitiveReportDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE r.id = $1");
        sqlx::query_as::<_, CompetitiveReportDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of reports, newest first, with the overall total.
    pub async fn list_page(
        pool: &PgPool,
        page: PageRequest,
    ) -> Result<(Vec<CompetitiveReportDetail>, i64), sqlx::Error> {
        let query = format!("{DETAIL_SELECT} ORDER BY r.created_at DESC, r.id DESC LIMIT $1 OFFSET $2");
        let rows = sqlx::query_as::<_, CompetitiveReportDetail>(&query)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM competitive_reports")
            .fetch_one(pool)
            .await?;
        Ok((rows, total))
    }

    /// Upload history of one auditor, newest first.
    pub async fn list_by_auditor(
        pool: &PgPool,
        field_auditor_id: DbId,
    ) -> Result<Vec<CompetitiveReportDetail>, sqlx::Error> {
        let query =
            format!("{DETAIL_SELECT} WHERE r.field_auditor_id = $1 ORDER BY r.created_at DESC, r.id DESC");
        sqlx::query_as::<_, CompetitiveReportDetail>(&query)
            .bind(field_auditor_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list_by_advertisers(
        pool: &PgPool,
        advertiser_ids: &[DbId],
    ) -> Result<Vec<CompetitiveReport>, sqlx::Error> {
        if advertiser_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM competitive_reports
             WHERE advertiser_id = ANY($1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, CompetitiveReport>(&query)
            .bind(advertiser_ids)
            .fetch_all(pool)
            .await
    }
}
