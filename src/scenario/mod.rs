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

//! End-to-end scenarios.
//!
//! A scenario borrows a [Cloud](../struct.Cloud.html) and records the
//! resources it creates, so that its tear down removes exactly those.
//! Scenario knobs come from [ScenarioConfig](struct.ScenarioConfig.html).

mod config;
mod windows;

pub use self::config::ScenarioConfig;
pub use self::windows::WindowsCompatibility;
