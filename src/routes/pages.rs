use axum::{
    extract::multipart::Field,
    extract::{Multipart, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tera::Context;

use crate::db;
use crate::error::AppError;
use crate::state::AppState;
use crate::storage::{self, FieldTag, MAX_FILE_SIZE};

pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    render_index(&state, None).await
}

struct UploadedPart {
    original_name: String,
    data: Vec<u8>,
}

pub async fn upload_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    match read_upload(&mut multipart).await {
        Ok((name, xml, image)) => {
            let timestamp = chrono::Utc::now().timestamp_millis();
            let xml_filename =
                storage::destination_filename(&xml.original_name, FieldTag::Xml, timestamp);
            let image_filename =
                storage::destination_filename(&image.original_name, FieldTag::Image, timestamp);

            tokio::fs::write(state.config.upload_folder.join(&xml_filename), &xml.data).await?;
            tokio::fs::write(state.config.upload_folder.join(&image_filename), &image.data)
                .await?;

            db::create_submission(
                state.pool.as_ref(),
                &name,
                &storage::public_path(&xml_filename),
                &storage::public_path(&image_filename),
            )
            .await?;

            Ok(Redirect::to(&format!("/blueprint/{}", xml_filename)).into_response())
        }
        // Validation failures re-render the listing with the message; the
        // files have not been written and no row exists at this point.
        Err(AppError::Validation(msg)) => {
            Ok(render_index(&state, Some(&msg)).await?.into_response())
        }
        Err(e) => Err(e),
    }
}

async fn read_upload(
    multipart: &mut Multipart,
) -> Result<(String, UploadedPart, UploadedPart), AppError> {
    let mut name = String::new();
    let mut xml_part: Option<UploadedPart> = None;
    let mut image_part: Option<UploadedPart> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(AppError::Validation(e.to_string())),
        };

        match field.name() {
            Some("name") => {
                name = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
            }
            Some("xmlFile") => {
                // An empty filename means the form input was left blank.
                if field.file_name().unwrap_or("").is_empty() {
                    continue;
                }
                xml_part = Some(read_file_part(field, FieldTag::Xml).await?);
            }
            Some("imageFile") => {
                if field.file_name().unwrap_or("").is_empty() {
                    continue;
                }
                image_part = Some(read_file_part(field, FieldTag::Image).await?);
            }
            _ => {}
        }
    }

    match (xml_part, image_part) {
        (Some(xml), Some(image)) => Ok((name, xml, image)),
        _ => Err(AppError::Validation(
            "Error: XML File or Image File not selected!".to_string(),
        )),
    }
}

async fn read_file_part(field: Field<'_>, tag: FieldTag) -> Result<UploadedPart, AppError> {
    let content_type = field.content_type().unwrap_or("").to_string();
    let allowed = match tag {
        FieldTag::Xml => content_type == "text/xml",
        FieldTag::Image => content_type.starts_with("image/"),
    };
    if !allowed {
        return Err(AppError::Validation(
            "Only .xml files or images are allowed".to_string(),
        ));
    }

    let original_name = field.file_name().unwrap_or("upload").to_string();
    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?;
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::Validation("File too large".to_string()));
    }

    Ok(UploadedPart {
        original_name,
        data: data.to_vec(),
    })
}

pub async fn view_blueprint(
    State(state): State<Arc<AppState>>,
    Path(xml_file_path): Path<String>,
) -> Result<Html<String>, AppError> {
    let submission = db::find_by_xml_filename(state.pool.as_ref(), &xml_file_path)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut ctx = Context::new();
    ctx.insert("blueprint", &submission);
    render_template("blueprint.html", ctx)
}

async fn render_index(state: &AppState, msg: Option<&str>) -> Result<Html<String>, AppError> {
    let submissions = db::list_submissions(state.pool.as_ref()).await?;

    let mut ctx = Context::new();
    ctx.insert("msg", &msg);
    ctx.insert("xml_files", &submissions);
    render_template("index.html", ctx)
}

fn render_template(name: &str, ctx: Context) -> Result<Html<String>, AppError> {
    let tera = crate::templates::get_tera();
    Ok(Html(tera.render(name, &ctx)?))
}
