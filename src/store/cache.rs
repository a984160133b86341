//! Process-wide snapshot cache.
//!
//! One slot per named query, holding an immutable `Arc` snapshot computed on
//! first use and reused until process restart. There is no invalidation and
//! no TTL. A failed load leaves its slot empty, so a later page view retries
//! instead of caching the failure. Downstream steps never mutate a snapshot;
//! filtering and aggregation always produce new tables.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serde::Serialize;
use tokio::sync::OnceCell;

use crate::domain::StoreError;
use crate::models::reference::{
    AuthorRow, BookAuthorRow, ClassificationRow, FacultyRow, ProgramRow, StaffRow, TitleRow,
};
use crate::models::{BookRow, LoanDetail, MemberRow};
use crate::store::queries;

/// The seven reference tables, loaded together for the reference page.
#[derive(Clone, Debug, Serialize)]
pub struct ReferenceData {
    pub fakultas: Vec<FacultyRow>,
    pub program_studi: Vec<ProgramRow>,
    pub pengarang: Vec<AuthorRow>,
    pub buku_pengarang: Vec<BookAuthorRow>,
    pub petugas: Vec<StaffRow>,
    pub judul: Vec<TitleRow>,
    pub klasifikasi: Vec<ClassificationRow>,
}

#[derive(Default)]
pub struct SnapshotCache {
    loans: OnceCell<Arc<Vec<LoanDetail>>>,
    members: OnceCell<Arc<Vec<MemberRow>>>,
    books: OnceCell<Arc<Vec<BookRow>>>,
    reference: OnceCell<Arc<ReferenceData>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn loans(
        &self,
        db: &DatabaseConnection,
    ) -> Result<Arc<Vec<LoanDetail>>, StoreError> {
        let snapshot = self
            .loans
            .get_or_try_init(|| async { queries::load_loan_details(db).await.map(Arc::new) })
            .await?;
        Ok(snapshot.clone())
    }

    pub async fn members(
        &self,
        db: &DatabaseConnection,
    ) -> Result<Arc<Vec<MemberRow>>, StoreError> {
        let snapshot = self
            .members
            .get_or_try_init(|| async { queries::load_members(db).await.map(Arc::new) })
            .await?;
        Ok(snapshot.clone())
    }

    pub async fn books(&self, db: &DatabaseConnection) -> Result<Arc<Vec<BookRow>>, StoreError> {
        let snapshot = self
            .books
            .get_or_try_init(|| async { queries::load_books(db).await.map(Arc::new) })
            .await?;
        Ok(snapshot.clone())
    }

    pub async fn reference(
        &self,
        db: &DatabaseConnection,
    ) -> Result<Arc<ReferenceData>, StoreError> {
        let snapshot = self
            .reference
            .get_or_try_init(|| async {
                Ok::<_, StoreError>(Arc::new(ReferenceData {
                    fakultas: queries::load_faculties(db).await?,
                    program_studi: queries::load_programs(db).await?,
                    pengarang: queries::load_authors(db).await?,
                    buku_pengarang: queries::load_book_authors(db).await?,
                    petugas: queries::load_staff(db).await?,
                    judul: queries::load_titles(db).await?,
                    klasifikasi: queries::load_classifications(db).await?,
                }))
            })
            .await?;
        Ok(snapshot.clone())
    }
}
