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

//! Reading Heat templates from disk.

use std::fs;
use std::path::Path;

use super::super::{Error, ErrorKind, Result};

/// Read a template file from a templates directory.
///
/// Fails with `TemplateUnreadable` if the file cannot be read.
pub fn read_template<P, S>(templates_dir: P, template_name: S) -> Result<String>
where
    P: AsRef<Path>,
    S: AsRef<Path>,
{
    let path = templates_dir.as_ref().join(template_name);
    trace!("Reading template from {:?}", path);
    fs::read_to_string(&path).map_err(|e| {
        debug!("Cannot read template {:?}: {}", path, e);
        Error::new(
            ErrorKind::TemplateUnreadable,
            format!("Can't read template: {}", e),
        )
    })
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::super::super::ErrorKind;
    use super::read_template;

    #[test]
    fn test_read_template() {
        let dir = tempfile::tempdir().unwrap();
        let contents = "heat_template_version: 2013-05-23\nresources: {}\n";
        fs::write(dir.path().join("empty.yaml"), contents).unwrap();

        assert_eq!(read_template(dir.path(), "empty.yaml").unwrap(), contents);
    }

    #[test]
    fn test_read_template_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_template(dir.path(), "missing.yaml").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TemplateUnreadable);
        assert!(err.message().unwrap().starts_with("Can't read template: "));
    }

    #[test]
    fn test_read_template_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        let err = read_template(dir.path(), "nested").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TemplateUnreadable);
    }
}
