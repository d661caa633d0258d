// Copyright 2018 Dmitry Tantsur <divius.inside@gmail.com>
// Copyright 2026 The mos-tests Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Foundation bits exposing the Image API.

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Body;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;

use super::super::service::IMAGE;
use super::super::session::Session;
use super::super::utils::Query;
use super::super::Result;
use super::protocol::*;

/// Page size used when listing images.
const PAGE_SIZE: usize = 100;

/// Request timeout for uploading image data.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(3600);

/// Create an image record without data.
pub fn create_image(session: &Session, request: ImageCreate) -> Result<Image> {
    debug!("Creating an image with {:?}", request);
    let image: Image = session.post_json(IMAGE, &["images"], &request)?;
    debug!("Created image {} in status {}", image.id, image.status);
    Ok(image)
}

/// Delete an image.
pub fn delete_image<S: AsRef<str>>(session: &Session, id: S) -> Result<()> {
    debug!("Deleting image {}", id.as_ref());
    session.delete(IMAGE, &["images", id.as_ref()])?;
    debug!("Image {} was deleted", id.as_ref());
    Ok(())
}

/// Get an image by its ID.
pub fn get_image<S: AsRef<str>>(session: &Session, id: S) -> Result<Image> {
    trace!("Fetching image {}", id.as_ref());
    let image: Image = session.get_json(IMAGE, &["images", id.as_ref()])?;
    trace!("Received {:?}", image);
    Ok(image)
}

/// List all images matching the query, following pagination markers.
pub fn list_images(session: &Session, query: &Query) -> Result<Vec<Image>> {
    let mut result = Vec::new();
    let mut marker: Option<String> = None;
    loop {
        let mut page_query = query.clone();
        page_query.push("limit", PAGE_SIZE);
        if let Some(ref value) = marker {
            page_query.push_str("marker", value.clone());
        }

        trace!("Listing images with {:?}", page_query);
        let root: ImagesRoot = session.get_json_query(IMAGE, &["images"], &page_query.0)?;
        trace!("Received images: {:?}", root.images);

        let last_id = root.images.last().map(|image| image.id.clone());
        result.extend(root.images);
        match (root.next, last_id) {
            (Some(..), Some(id)) => marker = Some(id),
            _ => break,
        }
    }

    debug!("Fetched {} images", result.len());
    Ok(result)
}

/// Upload image data.
pub fn upload_image<S, R>(session: &Session, id: S, data: R) -> Result<()>
where
    S: AsRef<str>,
    R: Read + Send + 'static,
{
    debug!("Uploading data for image {}", id.as_ref());
    let builder = session
        .request(Method::PUT, IMAGE, &["images", id.as_ref(), "file"])?
        .header(CONTENT_TYPE, "application/octet-stream")
        .timeout(UPLOAD_TIMEOUT)
        .body(Body::new(data));
    let _ = session.send(builder)?;
    debug!("Finished uploading data for image {}", id.as_ref());
    Ok(())
}
