use mdeploy_core::AppSettings;

/// Renders the Dockerfile written into the bundle root.
///
/// The output is a fixed template with the settings values interpolated
/// literally. Downstream callers diff and hash bundle output, so rendering
/// must stay deterministic byte for byte.
pub struct DockerfileGenerator<'a> {
    settings: &'a AppSettings,
}

impl<'a> DockerfileGenerator<'a> {
    pub fn new(settings: &'a AppSettings) -> Self {
        Self { settings }
    }

    pub fn render(&self) -> String {
        format!(
            r#"FROM saltzmanjoelh/meteor-alpine:latest
ENV NODE_ENV production

# Create app directory
RUN mkdir -p /usr/app
COPY . /usr/app
RUN cd /usr/app/programs/server && npm install --production
WORKDIR /usr/app/
ENV PORT=3000
ENV MONGO_URL={mongo_url}
ENV ROOT_URL={root_url}:{port}/
CMD ["npm", "start"]
EXPOSE {port}
"#,
            mongo_url = self.settings.mongo_url,
            root_url = self.settings.root_url,
            port = self.settings.port,
        )
    }
}
