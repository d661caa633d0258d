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

//! JSON structures and protocol bits for the Image API.

#![allow(missing_docs)]

use chrono::{DateTime, FixedOffset};

use super::super::common::protocol::deser_optional_timestamp;
use super::super::common::ResourceStatus;

protocol_enum! {
    #[doc = "Possible image statuses."]
    enum ImageStatus {
        Queued = "queued",
        Saving = "saving",
        Uploading = "uploading",
        Importing = "importing",
        Active = "active",
        Killed = "killed",
        Deleted = "deleted",
        PendingDelete = "pending_delete",
        Deactivated = "deactivated"
    }
}

impl ResourceStatus for ImageStatus {
    // Queued images may still be receiving data.
    fn is_in_progress(&self) -> bool {
        matches!(
            self,
            ImageStatus::Queued | ImageStatus::Saving | ImageStatus::Uploading | ImageStatus::Importing
        )
    }

    fn is_deleted(&self) -> bool {
        matches!(self, ImageStatus::Deleted | ImageStatus::PendingDelete)
    }
}

protocol_enum! {
    #[doc = "Possible image visibility values."]
    enum ImageVisibility {
        Public = "public",
        Community = "community",
        Shared = "shared",
        Private = "private"
    }
}

protocol_enum! {
    #[doc = "Possible container formats."]
    enum ImageContainerFormat {
        AMI = "ami",
        ARI = "ari",
        AKI = "aki",
        Bare = "bare",
        OVF = "ovf",
        OVA = "ova",
        Docker = "docker",
        Compressed = "compressed"
    }
}

protocol_enum! {
    #[doc = "Possible disk formats."]
    enum ImageDiskFormat {
        AMI = "ami",
        ARI = "ari",
        AKI = "aki",
        VHD = "vhd",
        VHDX = "vhdx",
        VMDK = "vmdk",
        Raw = "raw",
        QCOW2 = "qcow2",
        VDI = "vdi",
        ISO = "iso",
        Ploop = "ploop"
    }
}

/// An image.
#[derive(Clone, Debug, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub checksum: Option<String>,
    #[serde(default)]
    pub container_format: Option<ImageContainerFormat>,
    #[serde(deserialize_with = "deser_optional_timestamp", default)]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub disk_format: Option<ImageDiskFormat>,
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    pub status: ImageStatus,
    #[serde(default)]
    pub visibility: Option<ImageVisibility>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ImagesRoot {
    pub images: Vec<Image>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ImageCreate {
    pub name: String,
    pub container_format: ImageContainerFormat,
    pub disk_format: ImageDiskFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<ImageVisibility>,
}

#[cfg(test)]
mod test {
    use super::super::super::common::ResourceStatus;
    use super::{ImageDiskFormat, ImageStatus, ImagesRoot};

    #[test]
    fn test_image_status() {
        assert!(ImageStatus::Queued.is_in_progress());
        assert!(ImageStatus::Saving.is_in_progress());
        assert!(!ImageStatus::Active.is_in_progress());
        assert!(!ImageStatus::Killed.is_in_progress());
        assert!(ImageStatus::PendingDelete.is_deleted());
        assert!("bogus".parse::<ImageStatus>().is_err());
    }

    #[test]
    fn test_parse_images() {
        let root: ImagesRoot = serde_json::from_str(
            r#"{"images": [{
                "id": "1bea47ed-f6a9-463b-b423-14b9cca9ad27",
                "name": "cirros-0.3.5-x86_64-disk",
                "status": "active",
                "container_format": "bare",
                "disk_format": "qcow2",
                "visibility": "public",
                "size": 13267968,
                "checksum": "f8ab98ff5e73ebab884d80c9dc9c7290",
                "created_at": "2016-08-11T15:08:00Z"
            }, {
                "id": "0c40cab6-c8f6-4a60-a4c5-eb3c2e7a77a4",
                "status": "queued",
                "container_format": null,
                "disk_format": null
            }],
            "next": "/v2/images?marker=0c40cab6-c8f6-4a60-a4c5-eb3c2e7a77a4"}"#,
        )
        .unwrap();
        assert_eq!(root.images.len(), 2);
        assert_eq!(root.images[0].disk_format, Some(ImageDiskFormat::QCOW2));
        assert!(root.images[1].name.is_none());
        assert!(root.next.is_some());
    }
}
