use std::net::IpAddr;
use std::str::FromStr;

use anyhow::Result;
use serde::Serialize;

use crate::database::models::Employee;
use crate::database::repositories::OfficeRepository;

/// Outcome of the location gate. Denied and Unknown are normal negative
/// results, not errors; Unknown means the origin could not be determined
/// and the gate fails closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationDecision {
    Authorized,
    Denied,
    Unknown,
}

/// One entry of an office allow-list: an exact address or a CIDR prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkRule {
    Exact(IpAddr),
    Subnet { network: IpAddr, prefix_len: u8 },
}

impl FromStr for NetworkRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        match s.split_once('/') {
            None => {
                let addr: IpAddr = s.parse().map_err(|_| format!("Invalid address: {}", s))?;
                Ok(NetworkRule::Exact(addr))
            }
            Some((addr_part, prefix_part)) => {
                let network: IpAddr = addr_part
                    .parse()
                    .map_err(|_| format!("Invalid network: {}", addr_part))?;
                let prefix_len: u8 = prefix_part
                    .parse()
                    .map_err(|_| format!("Invalid prefix length: {}", prefix_part))?;

                let max_len = match network {
                    IpAddr::V4(_) => 32,
                    IpAddr::V6(_) => 128,
                };
                if prefix_len > max_len {
                    return Err(format!("Prefix length out of range: /{}", prefix_len));
                }

                Ok(NetworkRule::Subnet {
                    network,
                    prefix_len,
                })
            }
        }
    }
}

impl NetworkRule {
    pub fn contains(&self, addr: IpAddr) -> bool {
        match *self {
            NetworkRule::Exact(rule_addr) => rule_addr == addr,
            NetworkRule::Subnet {
                network,
                prefix_len,
            } => match (network, addr) {
                (IpAddr::V4(net), IpAddr::V4(ip)) => {
                    prefix_matches(u32::from(net) as u128, u32::from(ip) as u128, prefix_len, 32)
                }
                (IpAddr::V6(net), IpAddr::V6(ip)) => {
                    prefix_matches(u128::from(net), u128::from(ip), prefix_len, 128)
                }
                // Mixed address families never match.
                _ => false,
            },
        }
    }
}

fn prefix_matches(network: u128, addr: u128, prefix_len: u8, bits: u8) -> bool {
    if prefix_len == 0 {
        return true;
    }
    let shift = bits - prefix_len;
    (network >> shift) == (addr >> shift)
}

/// Unparseable entries are skipped with a warning rather than failing the
/// whole gate; a typo in one rule must not lock an office out.
pub fn parse_rules(raw: &[String]) -> Vec<NetworkRule> {
    raw.iter()
        .filter_map(|entry| match entry.parse::<NetworkRule>() {
            Ok(rule) => Some(rule),
            Err(err) => {
                log::warn!("Skipping malformed allow-list entry: {}", err);
                None
            }
        })
        .collect()
}

/// Pure gate decision. Remote staff are always authorized regardless of
/// origin; an unknown origin fails closed as `Unknown`.
pub fn evaluate(employee: &Employee, rules: &[NetworkRule], origin: Option<IpAddr>) -> LocationDecision {
    if employee.is_remote() {
        return LocationDecision::Authorized;
    }

    match origin {
        None => LocationDecision::Unknown,
        Some(ip) => {
            if rules.iter().any(|rule| rule.contains(ip)) {
                LocationDecision::Authorized
            } else {
                LocationDecision::Denied
            }
        }
    }
}

/// Gate wired to the per-office allow-list configuration.
#[derive(Clone)]
pub struct LocationGate {
    offices: OfficeRepository,
}

impl LocationGate {
    pub fn new(offices: OfficeRepository) -> Self {
        Self { offices }
    }

    pub async fn evaluate_for(
        &self,
        employee: &Employee,
        origin: Option<IpAddr>,
    ) -> Result<LocationDecision> {
        // Checked before any office lookup so the contract holds even when
        // a remote employee carries a stale office assignment.
        if employee.is_remote() {
            return Ok(LocationDecision::Authorized);
        }

        let rules = match employee.office_id {
            Some(office_id) => match self.offices.get_by_id(office_id).await? {
                Some(office) => parse_rules(&office.allowed_network_list()),
                None => Vec::new(),
            },
            None => Vec::new(),
        };

        Ok(evaluate(employee, &rules, origin))
    }
}
