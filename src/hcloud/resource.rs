//! Resource categories of the Hetzner Cloud API

use std::fmt;

/// A remote resource collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Server,
    LoadBalancer,
    Network,
    Volume,
    Firewall,
    FloatingIp,
    PrimaryIp,
    SshKey,
    PlacementGroup,
    Location,
    Datacenter,
    Image,
    ServerType,
    LoadBalancerType,
    Action,
    Pricing,
}

impl Resource {
    /// URL path segment, also the JSON key of list responses
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Server => "servers",
            Resource::LoadBalancer => "load_balancers",
            Resource::Network => "networks",
            Resource::Volume => "volumes",
            Resource::Firewall => "firewalls",
            Resource::FloatingIp => "floating_ips",
            Resource::PrimaryIp => "primary_ips",
            Resource::SshKey => "ssh_keys",
            Resource::PlacementGroup => "placement_groups",
            Resource::Location => "locations",
            Resource::Datacenter => "datacenters",
            Resource::Image => "images",
            Resource::ServerType => "server_types",
            Resource::LoadBalancerType => "load_balancer_types",
            Resource::Action => "actions",
            Resource::Pricing => "pricing",
        }
    }

    /// JSON key wrapping a single object in get/create/update responses
    pub fn singular(&self) -> &'static str {
        match self {
            Resource::Server => "server",
            Resource::LoadBalancer => "load_balancer",
            Resource::Network => "network",
            Resource::Volume => "volume",
            Resource::Firewall => "firewall",
            Resource::FloatingIp => "floating_ip",
            Resource::PrimaryIp => "primary_ip",
            Resource::SshKey => "ssh_key",
            Resource::PlacementGroup => "placement_group",
            Resource::Location => "location",
            Resource::Datacenter => "datacenter",
            Resource::Image => "image",
            Resource::ServerType => "server_type",
            Resource::LoadBalancerType => "load_balancer_type",
            Resource::Action => "action",
            Resource::Pricing => "pricing",
        }
    }

    /// Human-readable name used in confirmation messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Resource::Server => "Server",
            Resource::LoadBalancer => "Load Balancer",
            Resource::Network => "Network",
            Resource::Volume => "Volume",
            Resource::Firewall => "Firewall",
            Resource::FloatingIp => "Floating IP",
            Resource::PrimaryIp => "Primary IP",
            Resource::SshKey => "SSH Key",
            Resource::PlacementGroup => "Placement Group",
            Resource::Location => "Location",
            Resource::Datacenter => "Datacenter",
            Resource::Image => "Image",
            Resource::ServerType => "Server Type",
            Resource::LoadBalancerType => "Load Balancer Type",
            Resource::Action => "Action",
            Resource::Pricing => "Pricing",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
