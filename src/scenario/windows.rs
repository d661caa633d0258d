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

//! Guest image compatibility scenario.

use std::fs::File;
use std::net::IpAddr;
use std::process::Command;

use ipnet::IpNet;
use waiter::Waiter;

use super::super::compute::{Flavor, Server};
use super::super::image::{Image, ImageContainerFormat, ImageDiskFormat};
use super::super::network::{FloatingIp, NewSecurityGroupRule, RuleProtocol, SecurityGroup};
use super::super::{Cloud, Error, ErrorKind, Result};
use super::ScenarioConfig;

const ANY_IPV4: &str = "0.0.0.0/0";

/// Boot a server from an uploaded image and check it is reachable.
///
/// Everything created by the scenario is recorded and removed by
/// [tear_down](#method.tear_down), including when a step fails.
///
/// # Example
///
/// ```rust,no_run
/// use mos_tests::scenario::{ScenarioConfig, WindowsCompatibility};
///
/// let os = mos_tests::Cloud::from_env().expect("Unable to authenticate");
/// let config = ScenarioConfig::from_env().expect("Invalid scenario configuration");
/// let mut scenario = WindowsCompatibility::set_up(&os, config).expect("Set up failed");
/// let result = scenario.create_instance_with_image();
/// scenario.tear_down().expect("Tear down failed");
/// result.expect("Scenario failed");
/// ```
#[derive(Debug)]
pub struct WindowsCompatibility<'a> {
    cloud: &'a Cloud,
    config: ScenarioConfig,
    images_before: usize,
    security_group: Option<SecurityGroup>,
    floating_ip: Option<FloatingIp>,
    image: Option<Image>,
    flavor: Option<Flavor>,
    server: Option<Server>,
}

/// Pick the last item whose name contains the hint, otherwise the first one.
fn pick_by_hint<'i, T, F>(items: &'i [T], hint: &str, name: F) -> Option<&'i T>
where
    F: Fn(&T) -> &str,
{
    items
        .iter()
        .rev()
        .find(|item| name(item).contains(hint))
        .or_else(|| items.first())
}

fn ping_command(address: IpAddr, count: u32, interval: u32) -> Command {
    let mut command = Command::new("ping");
    command
        .arg("-c")
        .arg(count.to_string())
        .arg("-i")
        .arg(interval.to_string())
        .arg(address.to_string());
    command
}

fn ping(address: IpAddr, count: u32, interval: u32) -> Result<()> {
    let mut command = ping_command(address, count, interval);
    debug!("Running {:?}", command);
    let status = command.status().map_err(|e| {
        Error::new(
            ErrorKind::OperationFailed,
            format!("Cannot run ping: {}", e),
        )
    })?;
    if status.success() {
        Ok(())
    } else {
        Err(Error::new(
            ErrorKind::OperationFailed,
            format!("Instance is not reachable at {}: ping {}", address, status),
        ))
    }
}

impl<'a> WindowsCompatibility<'a> {
    /// Prepare the security group and the floating IP.
    ///
    /// The security group allows ICMP and TCP port 80 from anywhere. The
    /// floating IP is allocated on the first external network. The number of
    /// images is recorded for the check in [tear_down](#method.tear_down).
    pub fn set_up(cloud: &'a Cloud, config: ScenarioConfig) -> Result<WindowsCompatibility<'a>> {
        let images_before = cloud.find_images().count()?;
        info!("Setting up, {} image(s) exist", images_before);

        let mut scenario = WindowsCompatibility {
            cloud,
            config,
            images_before,
            security_group: None,
            floating_ip: None,
            image: None,
            flavor: None,
            server: None,
        };

        if let Err(e) = scenario.prepare() {
            scenario.clean_up();
            return Err(e);
        }

        Ok(scenario)
    }

    fn prepare(&mut self) -> Result<()> {
        let any: IpNet = ANY_IPV4.parse().map_err(|e| {
            Error::new(ErrorKind::InvalidInput, format!("Invalid CIDR: {}", e))
        })?;

        let group = self
            .cloud
            .new_security_group(self.config.security_group_name.clone())
            .with_description("Windows Compatibility")
            .create()?;
        info!("Created security group {} ({})", group.name(), group.id());
        let group = self.security_group.insert(group);
        group.add_rule(NewSecurityGroupRule::ingress(RuleProtocol::Icmp).with_remote_ip_prefix(any))?;
        group.add_rule(
            NewSecurityGroupRule::ingress(RuleProtocol::Tcp)
                .with_port_range(80, 80)
                .with_remote_ip_prefix(any),
        )?;

        let external = self
            .cloud
            .find_networks()
            .with_external(true)
            .all()?
            .into_iter()
            .next()
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::ResourceNotFound,
                    "No external network to allocate a floating IP from",
                )
            })?;
        let floating_ip = self.cloud.new_floating_ip(external.id().clone()).create()?;
        info!(
            "Allocated floating IP {} on network {}",
            floating_ip.floating_ip_address(),
            external.name()
        );
        self.floating_ip = Some(floating_ip);
        Ok(())
    }

    /// Configuration in use.
    #[inline]
    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// Image count recorded during set up.
    #[inline]
    pub fn images_before(&self) -> usize {
        self.images_before
    }

    /// Boot a server from the configured image and ping it.
    pub fn create_instance_with_image(&mut self) -> Result<()> {
        let image_id = self.upload_image()?;

        let networks = self.cloud.find_networks().all()?;
        let network = pick_by_hint(&networks, &self.config.network_hint, |n| n.name().as_str())
            .ok_or_else(|| Error::new(ErrorKind::ResourceNotFound, "No networks available"))?;
        info!("Starting with network {} ({})", network.name(), network.id());

        let flavor_id = self.choose_flavor()?;

        let waiter = self
            .cloud
            .new_server(self.config.server_name.clone(), flavor_id, image_id)
            .with_network(network.id().clone())
            .create()?;
        self.server = Some(waiter.current_state().clone());
        let server = waiter.wait()?;
        info!("Server {} ({}) is {}", server.name(), server.id(), server.status());
        self.server = Some(server.clone());

        let group_name = self
            .security_group
            .as_ref()
            .map(|group| group.name().clone())
            .unwrap_or_else(|| self.config.security_group_name.clone());
        server.add_security_group(group_name)?;

        let port = self
            .cloud
            .find_ports()
            .with_device_id(server.id().clone())
            .all()?
            .into_iter()
            .next()
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::ResourceNotFound,
                    format!("Server {} has no ports", server.id()),
                )
            })?;

        let floating_ip = self.floating_ip.as_mut().ok_or_else(|| {
            Error::new(ErrorKind::InvalidInput, "Scenario has no floating IP")
        })?;
        floating_ip.associate(port.id().clone())?;
        let address = floating_ip.floating_ip_address();
        info!("Using floating IP {} on port {}", address, port.id());

        ping(address, self.config.ping_count, self.config.ping_interval)?;
        info!("Server {} is reachable at {}", server.id(), address);
        Ok(())
    }

    fn upload_image(&mut self) -> Result<String> {
        let data = File::open(&self.config.image_path).map_err(|e| {
            Error::new(
                ErrorKind::InvalidConfig,
                format!("Cannot open image {:?}: {}", self.config.image_path, e),
            )
        })?;

        let image = self
            .cloud
            .new_image(self.config.image_name.clone())
            .with_disk_format(ImageDiskFormat::QCOW2)
            .with_container_format(ImageContainerFormat::Bare)
            .create()?;
        info!("Created image {}, uploading {:?}", image.id(), self.config.image_path);
        let image = self.image.insert(image);
        image.upload(data)?;

        let active = image.clone().wait_for_active().wait()?;
        info!("Image {} is {}", active.id(), active.status());
        let id = active.id().clone();
        self.image = Some(active);
        Ok(id)
    }

    fn choose_flavor(&mut self) -> Result<String> {
        let flavors = self.cloud.find_flavors().all()?;
        let hint = &self.config.flavor_hint;
        match flavors.iter().find(|flavor| flavor.name().contains(hint.as_str())) {
            Some(template) => {
                let flavor = template
                    .copy(format!("copy.of.{}", template.name()))
                    .with_vcpus(1)
                    .create()?;
                info!("Starting with flavor {} ({})", flavor.name(), flavor.id());
                let id = flavor.id().clone();
                self.flavor = Some(flavor);
                Ok(id)
            }
            None => {
                let flavor = self.cloud.get_flavor(&self.config.fallback_flavor_id)?;
                info!("Starting with flavor {} ({})", flavor.name(), flavor.id());
                Ok(flavor.id().clone())
            }
        }
    }

    fn clean_up(&mut self) {
        if let Some(server) = self.server.take() {
            info!("Deleting server {}", server.id());
            if let Err(e) = server.delete().and_then(|waiter| waiter.wait()) {
                warn!("Failed to delete server: {}", e);
            }
        }

        if let Some(image) = self.image.take() {
            info!("Deleting image {}", image.id());
            if let Err(e) = image.delete() {
                warn!("Failed to delete image: {}", e);
            }
        }

        if let Some(flavor) = self.flavor.take() {
            info!("Deleting flavor {}", flavor.id());
            if let Err(e) = flavor.delete() {
                warn!("Failed to delete flavor: {}", e);
            }
        }

        if let Some(group) = self.security_group.take() {
            info!("Deleting security group {}", group.id());
            if let Err(e) = group.delete() {
                warn!("Failed to delete security group: {}", e);
            }
        }

        if let Some(floating_ip) = self.floating_ip.take() {
            info!("Releasing floating IP {}", floating_ip.floating_ip_address());
            if let Err(e) = floating_ip.delete().and_then(|waiter| waiter.wait()) {
                warn!("Failed to release floating IP: {}", e);
            }
        }
    }

    /// Remove everything the scenario created.
    ///
    /// Cleanup failures are logged and do not stop the remaining steps.
    /// Fails with `OperationFailed` if the number of images differs from the
    /// one recorded during set up.
    pub fn tear_down(mut self) -> Result<()> {
        self.clean_up();

        let images_after = self.cloud.find_images().count()?;
        if images_after == self.images_before {
            info!("Tear down finished, {} image(s) left", images_after);
            Ok(())
        } else {
            Err(Error::new(
                ErrorKind::OperationFailed,
                format!(
                    "Number of images should be the same: {} before, {} after",
                    self.images_before, images_after
                ),
            ))
        }
    }
}
