// Copyright 2021 Dmitry Tantsur <dtantsur@protonmail.com>
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

//! Abstraction over a service catalog.

use reqwest::Url;

use super::super::session::EndpointFilters;
use super::super::{Error, ErrorKind, Result};
use super::protocol;

/// Abstraction over a service catalog.
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    inner: Vec<protocol::CatalogRecord>,
}

impl ServiceCatalog {
    pub(crate) fn new(catalog: Vec<protocol::CatalogRecord>) -> ServiceCatalog {
        ServiceCatalog { inner: catalog }
    }

    /// Find an endpoint in the catalog.
    pub fn find_endpoint(&self, service_type: &str, filters: &EndpointFilters) -> Result<Url> {
        let svc = match self.inner.iter().find(|x| x.service_type == service_type) {
            Some(s) => s,
            None => return Err(Error::new_endpoint_not_found(service_type)),
        };

        let endp = svc
            .endpoints
            .iter()
            .filter(|x| x.interface == filters.interface)
            .find(|x| match filters.region {
                Some(ref region) => x.region.as_ref() == Some(region),
                None => true,
            })
            .ok_or_else(|| Error::new_endpoint_not_found(service_type))?;

        debug!("Received {:?} for {}", endp, service_type);
        Url::parse(&endp.url).map_err(|e| {
            error!(
                "Invalid URL {} received from service catalog for service \
                 '{}', filters {:?}: {}",
                endp.url, service_type, filters, e
            );
            Error::new(
                ErrorKind::InvalidResponse,
                format!("Invalid URL {} for {} - {}", endp.url, service_type, e),
            )
        })
    }
}

#[cfg(test)]
pub mod test {
    use super::super::super::session::EndpointFilters;
    use super::super::super::ErrorKind;
    use super::super::protocol::{CatalogRecord, Endpoint};
    use super::ServiceCatalog;

    fn endpoint(interface: &str, region: &str, url: &str) -> Endpoint {
        Endpoint {
            interface: String::from(interface),
            region: Some(String::from(region)),
            url: String::from(url),
        }
    }

    pub fn demo_catalog() -> ServiceCatalog {
        ServiceCatalog::new(vec![
            CatalogRecord {
                service_type: String::from("orchestration"),
                endpoints: vec![
                    endpoint("public", "RegionOne", "https://host.one:8004/v1/abcd"),
                    endpoint("internal", "RegionOne", "http://192.168.22.1:8004/v1/abcd"),
                    endpoint("public", "RegionTwo", "https://host.two:8004/v1/abcd"),
                ],
            },
            CatalogRecord {
                service_type: String::from("image"),
                endpoints: vec![endpoint("public", "RegionOne", "https://host.one:9292")],
            },
        ])
    }

    fn filters(interface: &str, region: Option<&str>) -> EndpointFilters {
        EndpointFilters {
            interface: String::from(interface),
            region: region.map(String::from),
        }
    }

    #[test]
    fn test_find_endpoint() {
        let cat = demo_catalog();

        let e1 = cat.find_endpoint("orchestration", &filters("public", None)).unwrap();
        assert_eq!(e1.as_str(), "https://host.one:8004/v1/abcd");

        let e2 = cat
            .find_endpoint("orchestration", &filters("internal", None))
            .unwrap();
        assert_eq!(e2.as_str(), "http://192.168.22.1:8004/v1/abcd");

        let e3 = cat.find_endpoint("image", &filters("public", None)).unwrap();
        assert_eq!(e3.as_str(), "https://host.one:9292/");
    }

    #[test]
    fn test_find_endpoint_with_region() {
        let cat = demo_catalog();

        let e1 = cat
            .find_endpoint("orchestration", &filters("public", Some("RegionTwo")))
            .unwrap();
        assert_eq!(e1.as_str(), "https://host.two:8004/v1/abcd");
    }

    #[test]
    fn test_find_endpoint_not_found() {
        let cat = demo_catalog();

        for (service, interface, region) in &[
            ("foobar", "public", None),
            ("image", "internal", None),
            ("orchestration", "public", Some("RegionFoo")),
            ("orchestration", "internal", Some("RegionTwo")),
        ] {
            let err = cat
                .find_endpoint(service, &filters(interface, *region))
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::EndpointNotFound);
        }
    }
}
