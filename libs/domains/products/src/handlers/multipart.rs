use axum::extract::Multipart;

use crate::error::{ProductError, ProductResult};
use crate::models::{ImageUpload, ProductForm};

const FILE_FIELD: &str = "file";

/// Read the product text fields and the optional `file` part.
pub(super) async fn read_product_parts(
    mut multipart: Multipart,
) -> ProductResult<(ProductForm, Option<ImageUpload>)> {
    let mut form = ProductForm::default();
    let mut file = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match name.as_str() {
            FILE_FIELD => {
                let file_name = field
                    .file_name()
                    .map(str::to_owned)
                    .filter(|n| !n.is_empty())
                    .ok_or_else(|| {
                        ProductError::BadRequest("Part 'file' has no filename".to_string())
                    })?;
                let bytes = field.bytes().await?;
                file = Some(ImageUpload { file_name, bytes });
            }
            "name" => form.name = Some(field.text().await?),
            "price" => form.price = Some(field.text().await?),
            "category.id" => form.category_id = Some(field.text().await?),
            "category.name" => form.category_name = Some(field.text().await?),
            other => tracing::debug!(field = %other, "Ignoring multipart field"),
        }
    }

    Ok((form, file))
}

/// Read only the `file` part; other fields are ignored.
pub(super) async fn read_image(multipart: Multipart) -> ProductResult<ImageUpload> {
    let (_, file) = read_product_parts(multipart).await?;
    require_file(file)
}

pub(super) fn require_file(file: Option<ImageUpload>) -> ProductResult<ImageUpload> {
    file.ok_or_else(|| ProductError::BadRequest("Required part 'file' is missing".to_string()))
}
