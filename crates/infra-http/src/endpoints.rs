// Report service endpoints

pub const GENERATE_REPORT: &str = "/api/students/generate-report/";
pub const REPORTS: &str = "/api/students/reports/";

pub fn report_status(task_id: &str) -> String {
    format!("/api/students/report-status/{}/", task_id)
}

pub fn download_report(task_id: &str) -> String {
    format!("/api/students/reports/{}/download/", task_id)
}
