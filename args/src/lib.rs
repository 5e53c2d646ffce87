// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Command line of the filtergen binary

pub use clap::Parser;
use render::{ArtifactKind, Dialect, IpVer, RenderRequest, RenderRequestBuilder, RequestError};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "filtergen")]
#[command(version)]
#[command(
    about = "Render router filters from expanded AS sets and aggregated prefixes",
    long_about = None
)]
#[allow(clippy::struct_excessive_bools)]
pub struct CmdArgs {
    #[arg(short = '4', group = "family", help = "Generate IPv4 prefix-lists (default)")]
    ipv4: bool,

    #[arg(short = '6', group = "family", help = "Generate IPv6 prefix-lists")]
    ipv6: bool,

    // Dialects, Cisco IOS if none is given
    #[arg(short = 'J', group = "dialect", help = "Use Juniper syntax")]
    juniper: bool,

    #[arg(short = 'X', group = "dialect", help = "Use Cisco IOS XR syntax")]
    cisco_xr: bool,

    #[arg(short = 'B', group = "dialect", help = "Use OpenBGPD syntax")]
    openbgpd: bool,

    #[arg(short = 'b', group = "dialect", help = "Use BIRD syntax")]
    bird: bool,

    #[arg(short = 'j', group = "dialect", help = "Generate JSON output")]
    json: bool,

    #[arg(short = 'N', group = "dialect", help = "Use Nokia SR OS classic CLI syntax")]
    nokia: bool,

    #[arg(short = 'n', group = "dialect", help = "Use Nokia SR OS MD-CLI syntax")]
    nokia_md: bool,

    #[arg(short = 'U', group = "dialect", help = "Use Huawei VRP syntax")]
    huawei: bool,

    #[arg(short = 'e', group = "dialect", help = "Use Arista EOS syntax")]
    arista: bool,

    #[arg(short = 'K', group = "dialect", help = "Use Mikrotik RouterOS syntax")]
    mikrotik: bool,

    #[arg(
        short = 'F',
        group = "dialect",
        value_name = "TEMPLATE",
        help = "Format each prefix with TEMPLATE. Placeholders: %n prefix, %N name, %l and %h
shortest and longest matched length, %m netmask, %i wildcard mask, %% a literal %"
    )]
    format: Option<String>,

    #[arg(
        long = "dialect",
        group = "dialect",
        value_name = "DIALECT",
        value_parser = Dialect::lookup,
        help = "Select the output dialect by name, e.g. cisco, nokia-md, openbgpd"
    )]
    dialect_name: Option<Dialect>,

    // Artifact kinds, prefix-list if none is given
    #[arg(
        short = 'f',
        group = "kind",
        value_name = "ASN",
        help = "Generate an AS-path filter on routes received from ASN"
    )]
    as_path: Option<u32>,

    #[arg(
        short = 'G',
        group = "kind",
        value_name = "ASN",
        help = "Generate an AS-path filter on routes announced to ASN"
    )]
    oaspath: Option<u32>,

    #[arg(short = 't', group = "kind", help = "Generate an AS set")]
    as_set: bool,

    #[arg(short = 'E', group = "kind", help = "Generate an extended access list")]
    eacl: bool,

    #[arg(short = 'z', group = "kind", help = "Generate a route-filter-list (Juniper only)")]
    route_filter_list: bool,

    #[arg(short = 'l', value_name = "NAME", help = "Name of the generated object")]
    name: Option<String>,

    #[arg(
        short = 'a',
        value_name = "ASN",
        help = "AS number of the object, for OpenBGPD empty prefix-lists"
    )]
    asn: Option<u32>,

    #[arg(
        short = 'W',
        value_name = "N",
        value_parser = clap::value_parser!(u16).range(1..),
        help = "Number of AS numbers per AS-path clause, dialect default if not set"
    )]
    width: Option<u16>,

    #[arg(
        short = 's',
        conflicts_with = "sequence",
        help = "Number prefix-list entries from 1"
    )]
    seq: bool,

    #[arg(
        short = 'S',
        long = "sequence",
        value_name = "N",
        help = "Number prefix-list entries from N"
    )]
    sequence: Option<u32>,

    #[arg(
        short = 'M',
        value_name = "MATCH",
        help = "Extra match condition of Juniper route-filter policies"
    )]
    match_clause: Option<String>,

    #[arg(
        long,
        value_name = "tracing configuration",
        help = "Tracing config string as comma-separated sequence of tag=level, with level one in [off,error,warn,info,debug,trace].
Passing default=level sets the default log-level.
Passing all=level allows setting the log-level of all targets to level.
E.g. default=error,render=debug"
    )]
    tracing: Option<String>,

    #[arg(long, default_value_t = false, help = "Show configurable tracing targets and exit")]
    show_tracing_targets: bool,

    #[arg(long, default_value_t = false, help = "Show the available tracing tags and exit")]
    show_tracing_tags: bool,

    #[arg(
        long,
        default_value_t = false,
        help = "Show which artifacts each dialect can render and exit"
    )]
    show_capabilities: bool,

    #[arg(
        value_name = "DATA",
        help = "YAML file with the expanded ASNs and prefixes, - or nothing for stdin"
    )]
    input: Option<PathBuf>,
}

impl CmdArgs {
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        let selected = [
            (self.juniper, Dialect::Juniper),
            (self.cisco_xr, Dialect::CiscoXr),
            (self.openbgpd, Dialect::OpenBgpd),
            (self.bird, Dialect::Bird),
            (self.json, Dialect::Json),
            (self.nokia, Dialect::Nokia),
            (self.nokia_md, Dialect::NokiaMd),
            (self.huawei, Dialect::Huawei),
            (self.arista, Dialect::Arista),
            (self.mikrotik, Dialect::Mikrotik),
            (self.format.is_some(), Dialect::Format),
        ]
        .into_iter()
        .find_map(|(set, dialect)| set.then_some(dialect));
        selected.or(self.dialect_name).unwrap_or(Dialect::Cisco)
    }

    #[must_use]
    pub fn kind(&self) -> ArtifactKind {
        if self.as_path.is_some() {
            ArtifactKind::AsPath
        } else if self.oaspath.is_some() {
            ArtifactKind::OutputAsPath
        } else if self.as_set {
            ArtifactKind::AsSet
        } else if self.eacl {
            ArtifactKind::ExtendedAcl
        } else if self.route_filter_list {
            ArtifactKind::RouteFilterList
        } else {
            ArtifactKind::PrefixList
        }
    }

    #[must_use]
    pub fn family(&self) -> IpVer {
        if self.ipv6 && !self.ipv4 {
            IpVer::V6
        } else {
            IpVer::V4
        }
    }

    /// AS number of the path filters, or the one given with `-a`
    #[must_use]
    pub fn asn(&self) -> u32 {
        self.as_path.or(self.oaspath).or(self.asn).unwrap_or(0)
    }

    #[must_use]
    pub fn sequence(&self) -> u32 {
        match (self.sequence, self.seq) {
            (Some(first), _) => first,
            (None, true) => 1,
            (None, false) => 0,
        }
    }

    /// The render request the arguments describe.
    ///
    /// # Errors
    /// Fails if the request is not valid, e.g. if the format template does
    /// not parse.
    pub fn request(&self) -> Result<RenderRequest, RequestError> {
        let mut builder = RenderRequestBuilder::default();
        builder
            .dialect(self.dialect())
            .kind(self.kind())
            .asn(self.asn())
            .family(self.family())
            .sequence(self.sequence());
        if let Some(name) = &self.name {
            builder.name(name.as_str());
        }
        if let Some(width) = self.width {
            builder.aswidth(usize::from(width));
        }
        if let Some(clause) = &self.match_clause {
            builder.match_clause(clause.as_str());
        }
        if let Some(template) = &self.format {
            builder.template(template.as_str());
        }
        let request = builder.build()?;
        debug!("Request from command line: {request}");
        Ok(request)
    }

    /// Path of the data file, `None` for stdin
    #[must_use]
    pub fn input(&self) -> Option<&Path> {
        self.input
            .as_deref()
            .filter(|path| path.as_os_str() != "-")
    }

    #[must_use]
    pub fn tracing(&self) -> Option<&String> {
        self.tracing.as_ref()
    }
    #[must_use]
    pub fn show_tracing_targets(&self) -> bool {
        self.show_tracing_targets
    }
    #[must_use]
    pub fn show_tracing_tags(&self) -> bool {
        self.show_tracing_tags
    }
    #[must_use]
    pub fn show_capabilities(&self) -> bool {
        self.show_capabilities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> CmdArgs {
        CmdArgs::try_parse_from(std::iter::once("filtergen").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.dialect(), Dialect::Cisco);
        assert_eq!(args.kind(), ArtifactKind::PrefixList);
        assert_eq!(args.family(), IpVer::V4);
        assert_eq!(args.asn(), 0);
        assert_eq!(args.sequence(), 0);
        assert_eq!(args.input(), None);

        let request = args.request().unwrap();
        assert_eq!(request.name(), "NN");
        assert_eq!(request.aswidth(), 4);
    }

    #[test]
    fn test_as_path() {
        let args = parse(&["-J", "-f", "65000", "-l", "AS-CUSTOMERS", "-W", "2", "data.yaml"]);
        let request = args.request().unwrap();
        assert_eq!(request.dialect(), Dialect::Juniper);
        assert_eq!(request.kind(), ArtifactKind::AsPath);
        assert_eq!(request.asn(), 65000);
        assert_eq!(request.aswidth(), 2);
        assert_eq!(request.name(), "AS-CUSTOMERS");
        assert_eq!(args.input(), Some(Path::new("data.yaml")));

        let args = parse(&["-n", "-G", "65001", "-"]);
        assert_eq!(args.dialect(), Dialect::NokiaMd);
        assert_eq!(args.kind(), ArtifactKind::OutputAsPath);
        assert_eq!(args.asn(), 65001);
        assert_eq!(args.input(), None);
    }

    #[test]
    fn test_prefix_lists() {
        let args = parse(&["-6", "-U", "-s", "-l", "R1"]);
        assert_eq!(args.dialect(), Dialect::Huawei);
        assert_eq!(args.family(), IpVer::V6);
        assert_eq!(args.sequence(), 1);

        let args = parse(&["--dialect", "cisco-xr", "-S", "10"]);
        assert_eq!(args.dialect(), Dialect::CiscoXr);
        assert_eq!(args.sequence(), 10);

        let args = parse(&["-F", "%n\\n", "-l", "R1"]);
        let request = args.request().unwrap();
        assert_eq!(request.dialect(), Dialect::Format);
        assert_eq!(request.template(), Some("%n\\n"));
    }

    #[test]
    fn test_acls() {
        let args = parse(&["-J", "-E", "-M", "protocol bgp", "-l", "POLICY/TERM"]);
        let request = args.request().unwrap();
        assert_eq!(request.kind(), ArtifactKind::ExtendedAcl);
        assert_eq!(request.match_clause(), Some("protocol bgp"));
        assert_eq!(parse(&["-J", "-z"]).kind(), ArtifactKind::RouteFilterList);
        assert_eq!(parse(&["-B", "-t"]).kind(), ArtifactKind::AsSet);
    }

    #[test]
    fn test_bad_arguments() {
        let bad = |args: &[&str]| {
            CmdArgs::try_parse_from(std::iter::once("filtergen").chain(args.iter().copied()))
                .is_err()
        };
        assert!(bad(&["-J", "-b"]));
        assert!(bad(&["-4", "-6"]));
        assert!(bad(&["-t", "-E"]));
        assert!(bad(&["-W", "0"]));
        assert!(bad(&["--dialect", "vyos"]));
        assert!(bad(&["-s", "-S", "5"]));
        assert!(bad(&["-f", "not-an-asn"]));
    }

    #[test]
    fn test_bad_template() {
        let args = parse(&["-F", "%n %q"]);
        assert!(matches!(args.request(), Err(RequestError::Template(_))));
    }
}
