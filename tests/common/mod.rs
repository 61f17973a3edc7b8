#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use reqwest::multipart;
use reqwest::Client;
use tempfile::TempDir;

use blueprint_board::config::Config;
use blueprint_board::db::{self, DbPool, Submission};
use blueprint_board::state::AppState;

/// A real server on an ephemeral port, backed by a throwaway SQLite file and
/// upload directory. The client never follows redirects so `Location`
/// headers stay assertable.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub pool: DbPool,
    pub upload_dir: PathBuf,
    _tmp: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(false).await
    }

    pub async fn spawn_with_removal() -> Self {
        Self::spawn_with(true).await
    }

    async fn spawn_with(removal_enabled: bool) -> Self {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let upload_dir = tmp.path().join("uploads");
        std::fs::create_dir_all(&upload_dir).expect("Failed to create upload dir");

        let db_path = tmp.path().join("database.db");
        let database_url = format!("sqlite://{}", db_path.display());

        let config = Arc::new(Config {
            database_url: database_url.clone(),
            upload_folder: upload_dir.clone(),
            host: "127.0.0.1".to_string(),
            port: 0,
            removal_enabled,
        });

        let pool = db::create_pool(&database_url)
            .await
            .expect("Failed to create pool");
        db::run_migrations(pool.as_ref())
            .await
            .expect("Failed to run migrations");

        let state = Arc::new(AppState {
            pool: pool.clone(),
            config,
        });
        let app = blueprint_board::app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Server stopped unexpectedly");
        });

        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build client");

        Self {
            addr,
            client,
            pool,
            upload_dir,
            _tmp: tmp,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Uploads both parts; each tuple is (filename, content type, bytes).
    pub async fn upload(
        &self,
        name: &str,
        xml: (&str, &str, &[u8]),
        image: (&str, &str, &[u8]),
    ) -> reqwest::Response {
        let form = multipart::Form::new()
            .text("name", name.to_string())
            .part("xmlFile", file_part(xml))
            .part("imageFile", file_part(image));
        self.post_upload(form).await
    }

    pub async fn post_upload(&self, form: multipart::Form) -> reqwest::Response {
        self.client
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send upload")
    }

    pub async fn vote(&self, xml_file_path: &str) -> reqwest::Response {
        self.client
            .post(self.url("/vote"))
            .form(&[("xmlFilePath", xml_file_path)])
            .send()
            .await
            .expect("Failed to send vote")
    }

    pub async fn report(&self, xml_file_path: &str) -> reqwest::Response {
        self.client
            .post(self.url("/report"))
            .form(&[("xmlFilePath", xml_file_path)])
            .send()
            .await
            .expect("Failed to send report")
    }

    pub async fn submissions(&self) -> Vec<Submission> {
        db::list_submissions(self.pool.as_ref())
            .await
            .expect("Failed to list submissions")
    }

    /// Filenames currently present in the upload directory.
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.upload_dir)
            .expect("Failed to read upload dir")
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

pub fn file_part((filename, content_type, bytes): (&str, &str, &[u8])) -> multipart::Part {
    multipart::Part::bytes(bytes.to_vec())
        .file_name(filename.to_string())
        .mime_str(content_type)
        .expect("Invalid content type")
}

/// The generated XML filename from a redirect target like `/blueprint/<file>`.
pub fn filename_from_location(location: &str) -> String {
    location
        .strip_prefix("/blueprint/")
        .expect("Unexpected redirect target")
        .to_string()
}
