//
//  Copyright (C) 2022-2024  Chase Ruskin
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

use super::connect::ConnectionPlan;
use super::declaration::Declaration;
use super::unit::ModuleInfo;
use crate::core::settings::Settings;

fn tab(settings: &Settings, depth: usize) -> String {
    format!(
        "{:<width$}",
        "",
        width = settings.get_tab_size() as usize * depth
    )
}

fn longest_name(decls: &[Declaration]) -> usize {
    decls
        .iter()
        .map(|d| d.get_name().len())
        .max()
        .unwrap_or(0)
}

/// One interface entry: `name : [dir ]type[ := default]`.
fn interface_line(d: &Declaration, offset: usize) -> String {
    let mut line = format!("{:<width$} : ", d.get_name(), width = offset);
    if let Some(dir) = d.get_direction() {
        line.push_str(&format!("{} ", dir));
    }
    line.push_str(d.get_type().unwrap_or(""));
    if let Some(value) = d.get_default() {
        line.push_str(&format!(" := {}", value));
    }
    line
}

fn interface_clause(
    keyword: &str,
    decls: &[Declaration],
    settings: &Settings,
    depth: usize,
) -> String {
    let offset = longest_name(decls);
    let mut result = format!("{}{} (\n", tab(settings, depth), keyword);
    for (i, d) in decls.iter().enumerate() {
        result.push_str(&tab(settings, depth + 1));
        result.push_str(&interface_line(d, offset));
        if i + 1 < decls.len() {
            result.push(';');
        }
        result.push('\n');
    }
    result.push_str(&format!("{});\n", tab(settings, depth)));
    result
}

impl ModuleInfo {
    /// Generates VHDL component declaration code from the unit's interface.
    pub fn into_component(&self, settings: &Settings) -> String {
        let mut result = format!("component {}\n", self.get_name());
        if self.get_generics().is_empty() == false {
            result.push_str(&interface_clause("generic", self.get_generics(), settings, 1));
        }
        if self.get_ports().is_empty() == false {
            result.push_str(&interface_clause("port", self.get_ports(), settings, 1));
        }
        result.push_str("end component;\n");
        result
    }

    /// Generates a direct instantiation of the unit.
    ///
    /// Generic values come from the generic's name, or from its default when
    /// `generic-fill` is enabled. Port values bind name-to-name unless a
    /// `ConnectionPlan` supplies the local signal names.
    pub fn into_instance(
        &self,
        inst: Option<&str>,
        lib: Option<&str>,
        settings: &Settings,
        plan: Option<&ConnectionPlan>,
    ) -> String {
        let name = inst.unwrap_or(settings.get_instance_name());
        let prefix = match lib {
            Some(l) => format!("entity {}.", l),
            None => String::new(),
        };
        let mut result = format!("{} : {}{}", name, prefix, self.get_name());

        if self.get_generics().is_empty() == false {
            let offset = longest_name(self.get_generics());
            result.push_str(&format!("\n{}generic map (\n", tab(settings, 1)));
            for (i, g) in self.get_generics().iter().enumerate() {
                let value = match settings.is_generic_fill() {
                    true => g.get_default().unwrap_or(g.get_name()),
                    false => g.get_name(),
                };
                result.push_str(&format!(
                    "{}{:<width$} => {}",
                    tab(settings, 2),
                    g.get_name(),
                    value,
                    width = offset
                ));
                if i + 1 < self.get_generics().len() {
                    result.push(',');
                }
                result.push('\n');
            }
            result.push_str(&format!("{})", tab(settings, 1)));
        }
        if self.get_ports().is_empty() == false {
            let offset = longest_name(self.get_ports());
            result.push_str(&format!("\n{}port map (\n", tab(settings, 1)));
            for (i, p) in self.get_ports().iter().enumerate() {
                let rhs = plan
                    .and_then(|c| c.get_bindings().get(p.get_name()))
                    .map(|s| s.as_str())
                    .unwrap_or(p.get_name());
                result.push_str(&format!(
                    "{}{:<width$} => {}",
                    tab(settings, 2),
                    p.get_name(),
                    rhs,
                    width = offset
                ));
                if i + 1 < self.get_ports().len() {
                    result.push(',');
                }
                result.push('\n');
            }
            result.push_str(&format!("{})", tab(settings, 1)));
        }
        result.push_str(";\n");
        result
    }

    /// Generates signal declarations mirroring the unit's ports, for pasting
    /// into a destination architecture.
    pub fn into_signals(&self, prefix: &str, suffix: &str) -> String {
        let offset = self
            .get_ports()
            .iter()
            .map(|p| p.get_name().len() + prefix.len() + suffix.len())
            .max()
            .unwrap_or(0);
        let mut result = String::new();
        for p in self.get_ports() {
            result.push_str(&format!(
                "signal {:<width$} : {};\n",
                format!("{}{}{}", prefix, p.get_name(), suffix),
                p.get_type().unwrap_or(""),
                width = offset
            ));
        }
        result
    }

    /// Generates constant declarations mirroring the unit's generics.
    pub fn into_constants(&self) -> String {
        let offset = longest_name(self.get_generics());
        let mut result = String::new();
        for g in self.get_generics() {
            result.push_str(&format!(
                "constant {:<width$} : {}",
                g.get_name(),
                g.get_type().unwrap_or(""),
                width = offset
            ));
            if let Some(value) = g.get_default() {
                result.push_str(&format!(" := {}", value));
            }
            result.push_str(";\n");
        }
        result
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::vhdl::unit::parse_unit;

    const FIFO: &str = "\
entity fifo is
  generic (
    WIDTH : positive := 8;
    DEPTH : positive := 16
  );
  port (
    clk  : in  std_logic;
    din  : in  std_logic_vector(WIDTH-1 downto 0);
    full : out std_logic
  );
end entity;";

    #[test]
    fn component_text() {
        let info = parse_unit(FIFO, Some("fifo")).unwrap();
        let text = info.into_component(&Settings::new());
        assert_eq!(
            text,
            "\
component fifo
  generic (
    WIDTH : positive := 8;
    DEPTH : positive := 16
  );
  port (
    clk  : in std_logic;
    din  : in std_logic_vector(WIDTH-1 downto 0);
    full : out std_logic
  );
end component;
"
        );
    }

    #[test]
    fn instance_text() {
        let info = parse_unit(FIFO, Some("fifo")).unwrap();
        let text = info.into_instance(Some("u0"), Some("work"), &Settings::new(), None);
        assert_eq!(
            text,
            "\
u0 : entity work.fifo
  generic map (
    WIDTH => WIDTH,
    DEPTH => DEPTH
  )
  port map (
    clk  => clk,
    din  => din,
    full => full
  );
"
        );
    }

    #[test]
    fn generic_fill_uses_defaults() {
        let info = parse_unit(FIFO, Some("fifo")).unwrap();
        let mut settings = Settings::new();
        settings.set_generic_fill(true);
        let text = info.into_instance(None, None, &settings, None);
        assert_eq!(text.contains("WIDTH => 8"), true);
        assert_eq!(text.contains("DEPTH => 16"), true);
        assert_eq!(text.starts_with("uX : fifo"), true);
    }

    #[test]
    fn signal_declarations() {
        let info = parse_unit(FIFO, Some("fifo")).unwrap();
        let text = info.into_signals("", "_s");
        assert_eq!(text.contains("signal clk_s  : std_logic;"), true);
        assert_eq!(
            text.contains("signal din_s  : std_logic_vector(WIDTH-1 downto 0);"),
            true
        );
        assert_eq!(text.contains("signal full_s : std_logic;"), true);
    }

    #[test]
    fn constant_declarations() {
        let info = parse_unit(FIFO, Some("fifo")).unwrap();
        let text = info.into_constants();
        assert_eq!(
            text,
            "constant WIDTH : positive := 8;\nconstant DEPTH : positive := 16;\n"
        );
    }
}
