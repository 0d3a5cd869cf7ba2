use askama::Template;
use uuid::Uuid;

use crate::batch::ResumeRecord;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub max_upload_mb: usize,
}

#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsPage<'a> {
    pub batch_id: Uuid,
    pub records: &'a [ResumeRecord],
    pub skipped: usize,
}
