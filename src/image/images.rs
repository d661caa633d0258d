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

//! Image management via Image API.

use std::io::Read;
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset};

use super::super::common::{Refresh, StatusWaiter, TrackedResource, DEFAULT_DELAY};
use super::super::session::Session;
use super::super::utils::{self, Query};
use super::super::Result;
use super::{api, protocol};

/// Time budget for an image to become active.
pub const IMAGE_ACTIVE_TIMEOUT: Duration = Duration::from_secs(1800);

/// A query to image list.
#[derive(Clone, Debug)]
pub struct ImageQuery {
    session: Rc<Session>,
    query: Query,
}

/// Structure representing a single image.
#[derive(Clone, Debug)]
pub struct Image {
    session: Rc<Session>,
    inner: protocol::Image,
}

/// A request to create an image.
#[derive(Clone, Debug)]
pub struct NewImage {
    session: Rc<Session>,
    inner: protocol::ImageCreate,
}

impl Image {
    /// Create an Image object.
    pub(crate) fn new(session: Rc<Session>, inner: protocol::Image) -> Image {
        Image { session, inner }
    }

    /// Load an Image object.
    pub(crate) fn load<Id: AsRef<str>>(session: Rc<Session>, id: Id) -> Result<Image> {
        let inner = api::get_image(&session, id)?;
        Ok(Image::new(session, inner))
    }

    transparent_property! {
        #[doc = "Checksum of the image data (if uploaded)."]
        checksum: ref Option<String>
    }

    transparent_property! {
        #[doc = "Container format."]
        container_format: Option<protocol::ImageContainerFormat>
    }

    transparent_property! {
        #[doc = "Creating date and time."]
        created_at: Option<DateTime<FixedOffset>>
    }

    transparent_property! {
        #[doc = "Disk format."]
        disk_format: Option<protocol::ImageDiskFormat>
    }

    transparent_property! {
        #[doc = "Unique ID."]
        id: ref String
    }

    transparent_property! {
        #[doc = "Image name."]
        name: ref Option<String>
    }

    transparent_property! {
        #[doc = "Image size in bytes."]
        size: Option<u64>
    }

    transparent_property! {
        #[doc = "Image status."]
        status: protocol::ImageStatus
    }

    transparent_property! {
        #[doc = "Image visibility."]
        visibility: Option<protocol::ImageVisibility>
    }

    /// Upload image data from a reader.
    ///
    /// The data is streamed as `application/octet-stream`.
    pub fn upload<R: Read + Send + 'static>(&mut self, data: R) -> Result<()> {
        api::upload_image(&self.session, &self.inner.id, data)?;
        self.refresh()
    }

    /// Wait for the image to become active.
    pub fn wait_for_active(self) -> StatusWaiter<Image> {
        StatusWaiter::new(
            self,
            protocol::ImageStatus::Active,
            IMAGE_ACTIVE_TIMEOUT,
            DEFAULT_DELAY,
        )
    }

    /// Delete the image.
    pub fn delete(self) -> Result<()> {
        api::delete_image(&self.session, &self.inner.id)
    }
}

impl Refresh for Image {
    /// Refresh the image.
    fn refresh(&mut self) -> Result<()> {
        self.inner = api::get_image(&self.session, &self.inner.id)?;
        Ok(())
    }
}

impl TrackedResource for Image {
    type Status = protocol::ImageStatus;

    const KIND: &'static str = "image";

    fn resource_id(&self) -> &str {
        &self.inner.id
    }

    fn resource_status(&self) -> protocol::ImageStatus {
        self.inner.status
    }
}

impl ImageQuery {
    pub(crate) fn new(session: Rc<Session>) -> ImageQuery {
        ImageQuery {
            session,
            query: Query::new(),
        }
    }

    query_filter! {
        #[doc = "Filter by image name."]
        with_name -> name
    }

    query_filter! {
        #[doc = "Filter by image status."]
        with_status -> status: protocol::ImageStatus
    }

    query_filter! {
        #[doc = "Filter by visibility."]
        with_visibility -> visibility: protocol::ImageVisibility
    }

    /// Execute this request and return all results.
    ///
    /// Follows pagination until all images are fetched.
    pub fn all(self) -> Result<Vec<Image>> {
        debug!("Fetching images with {:?}", self.query);
        let session = self.session;
        Ok(api::list_images(&session, &self.query)?
            .into_iter()
            .map(|item| Image::new(session.clone(), item))
            .collect())
    }

    /// Count images matching the query.
    pub fn count(self) -> Result<usize> {
        Ok(api::list_images(&self.session, &self.query)?.len())
    }

    /// Return one and exactly one result.
    ///
    /// Fails with `ResourceNotFound` if the query produces no results and
    /// with `TooManyItems` if the query produces more than one result.
    pub fn one(self) -> Result<Image> {
        debug!("Fetching one image with {:?}", self.query);
        utils::one(
            self.all()?,
            "Image with given filters not found",
            "Too many images found with given filters",
        )
    }
}

impl NewImage {
    /// Start creating an image.
    ///
    /// Defaults to a `bare` container with a `qcow2` disk.
    pub(crate) fn new(session: Rc<Session>, name: String) -> NewImage {
        NewImage {
            session,
            inner: protocol::ImageCreate {
                name,
                container_format: protocol::ImageContainerFormat::Bare,
                disk_format: protocol::ImageDiskFormat::QCOW2,
                visibility: None,
            },
        }
    }

    /// Request creation of the image record.
    ///
    /// The image stays `queued` until data is uploaded.
    pub fn create(self) -> Result<Image> {
        let inner = api::create_image(&self.session, self.inner)?;
        Ok(Image::new(self.session, inner))
    }

    /// Set the container format.
    pub fn with_container_format(mut self, value: protocol::ImageContainerFormat) -> NewImage {
        self.inner.container_format = value;
        self
    }

    /// Set the disk format.
    pub fn with_disk_format(mut self, value: protocol::ImageDiskFormat) -> NewImage {
        self.inner.disk_format = value;
        self
    }

    /// Set the visibility.
    pub fn with_visibility(mut self, value: protocol::ImageVisibility) -> NewImage {
        self.inner.visibility = Some(value);
        self
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use waiter::Waiter;

    use super::super::super::session::test::MockCloud;
    use super::super::super::ErrorKind;
    use super::super::protocol::{ImageStatus, ImageVisibility};
    use super::{ImageQuery, NewImage};

    fn image_json(status: &str) -> String {
        format!(
            r#"{{"id": "img1", "name": "win", "status": "{}",
                 "container_format": "bare", "disk_format": "qcow2"}}"#,
            status
        )
    }

    #[test]
    fn test_create_upload_activate() {
        let uploaded = Arc::new(Mutex::new(String::new()));
        let data = uploaded.clone();
        let polls = AtomicUsize::new(0);
        let cloud = MockCloud::start(move |method, path, body| match (method, path) {
            ("POST", "/image/v2/images") => {
                assert!(body.contains(r#""disk_format":"qcow2""#));
                assert!(body.contains(r#""visibility":"public""#));
                (201, image_json("queued"))
            }
            ("PUT", "/image/v2/images/img1/file") => {
                data.lock().unwrap().push_str(body);
                (204, String::new())
            }
            ("GET", "/image/v2/images/img1") => {
                let status = match polls.fetch_add(1, Ordering::SeqCst) {
                    0 => "saving",
                    _ => "active",
                };
                (200, image_json(status))
            }
            _ => (400, String::from("unexpected request")),
        });

        let mut image = NewImage::new(cloud.session(), "win".into())
            .with_visibility(ImageVisibility::Public)
            .create()
            .unwrap();
        assert_eq!(image.status(), ImageStatus::Queued);
        image.upload(Cursor::new(b"qcow2 bytes".to_vec())).unwrap();
        assert_eq!(image.status(), ImageStatus::Saving);

        let image = image
            .wait_for_active()
            .with_delay(Duration::from_millis(10))
            .wait()
            .unwrap();
        assert_eq!(image.status(), ImageStatus::Active);
        assert_eq!(uploaded.lock().unwrap().as_str(), "qcow2 bytes");
    }

    #[test]
    fn test_activation_killed() {
        let cloud = MockCloud::start(|method, _, _| match method {
            "POST" => (201, image_json("queued")),
            _ => (200, image_json("killed")),
        });
        let image = NewImage::new(cloud.session(), "win".into()).create().unwrap();
        let err = image
            .wait_for_active()
            .with_delay(Duration::from_millis(10))
            .wait()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);
        assert!(err.to_string().contains("killed"));
    }

    #[test]
    fn test_count_follows_pages() {
        let cloud = MockCloud::start(|_, path, _| {
            if path.contains("marker=b") {
                (200, String::from(r#"{"images": [{"id": "c", "status": "active"}]}"#))
            } else {
                assert_eq!(path, "/image/v2/images?limit=100");
                (
                    200,
                    String::from(
                        r#"{"images": [{"id": "a", "status": "active"}, {"id": "b", "status": "queued"}],
                            "next": "/v2/images?marker=b"}"#,
                    ),
                )
            }
        });
        assert_eq!(ImageQuery::new(cloud.session()).count().unwrap(), 3);
        assert_eq!(cloud.requests().len(), 2);
    }

    #[test]
    fn test_delete_image() {
        let cloud = MockCloud::start(|method, path, _| match (method, path) {
            ("GET", "/image/v2/images/img1") => (200, image_json("active")),
            ("DELETE", "/image/v2/images/img1") => (204, String::new()),
            _ => (400, String::from("unexpected request")),
        });
        let image = super::Image::load(cloud.session(), "img1").unwrap();
        assert_eq!(image.name().as_deref(), Some("win"));
        image.delete().unwrap();
    }
}
